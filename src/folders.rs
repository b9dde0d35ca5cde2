//! 모듈 폴더 탐색 모듈
//!
//! 검색 기준 하나에 대해 모듈 폴더 후보를 찾는 glob 목록을 만들고 해석합니다.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::log::{format_json, Logger};
use crate::pattern::FolderNamePattern;
use crate::resolve::{escape_literal, GlobEntry, GlobResolve, ResolveOptions};

/// 작업 폴더 기준으로 고정된 검색 기준
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchingBase {
    /// 사용자가 입력한 그대로의 glob
    raw: String,
    /// 절대 경로로 고정되고 `/`로 끝나는 glob
    anchored: String,
}

impl SearchingBase {
    /// 검색 기준 glob을 작업 폴더에 고정
    ///
    /// 상대 glob은 이스케이프된 작업 폴더 아래로 붙이고, 절대 glob은 그대로 둡니다.
    /// `\` 구분자는 `/`로 바뀌고, 끝의 구분자는 `/` 하나로 정리됩니다.
    pub fn new(raw: &str, working_dir: &Path) -> Self {
        let normalized = raw.replace('\\', "/");
        let body = normalized.trim_end_matches('/');

        let anchored = if Path::new(body).is_absolute() || body.starts_with('/') {
            format!("{}/", body)
        } else {
            let cwd = working_dir.to_string_lossy();
            let cwd = escape_literal(cwd.trim_end_matches(['/', '\\']));
            let relative = body.strip_prefix("./").unwrap_or(body);
            if relative.is_empty() || relative == "." {
                format!("{}/", cwd)
            } else {
                format!("{}/{}/", cwd, relative)
            }
        };

        Self {
            raw: raw.to_string(),
            anchored,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `/`로 끝나는 절대 glob
    pub fn anchored(&self) -> &str {
        &self.anchored
    }

    /// 검색 기준의 마지막 경로 구간 (리터럴로 취급)
    pub fn base_name(&self) -> &str {
        self.raw
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
    }
}

/// 검색 기준 하나에 대한 모듈 폴더 탐색 glob 목록
///
/// 검색 기준 자체가 모듈 폴더이면 그 폴더만 후보로 삼고,
/// 아니면 그 아래 임의 깊이의 모듈 폴더를 찾습니다.
/// 중첩 폴더를 포함하지 않을 때는 이중 집계를 막는 제외 glob이 추가됩니다.
pub fn folder_globs(
    base: &SearchingBase,
    pattern: &FolderNamePattern,
    include_nested: bool,
) -> Vec<GlobEntry> {
    let root = base.anchored();
    let deep = pattern.deep_pattern();
    let mut globs = Vec::with_capacity(2);

    if pattern.is_match(base.base_name()) {
        globs.push(GlobEntry::Include(root.to_string()));
        if !include_nested {
            globs.push(GlobEntry::Exclude(format!("{}{}", root, deep)));
        }
    } else {
        globs.push(GlobEntry::Include(format!("{}{}", root, deep)));
        if !include_nested {
            globs.push(GlobEntry::Exclude(format!("{}{}{}", root, deep, deep)));
        }
    }

    globs
}

/// 검색 기준 하나에서 모듈 폴더 후보 찾기
pub fn resolve_module_folders<R>(
    base: &SearchingBase,
    pattern: &FolderNamePattern,
    include_nested: bool,
    resolver: &R,
    logger: &Logger,
) -> Result<Vec<PathBuf>>
where
    R: GlobResolve + ?Sized,
{
    let globs = folder_globs(base, pattern, include_nested);
    let folders = resolver.resolve(&globs, &ResolveOptions::new())?;

    logger.detail(|| {
        let rendered: Vec<String> = globs.iter().map(ToString::to_string).collect();
        format!(
            "검색 기준 처리 중: {}\n\n매칭된 모듈 폴더: {}",
            format_json(&rendered),
            format_json(&folders)
        )
    });

    Ok(folders)
}
