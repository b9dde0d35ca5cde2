//! 출력 버킷 구성 모듈
//!
//! 매칭된 모듈 폴더 하나마다 출력 파일 이름을 계산하고,
//! 충돌을 검사한 뒤 소속 파일 목록을 모읍니다.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{GroupingError, Result};
use crate::folders::SearchingBase;
use crate::log::{format_json, Logger};
use crate::pattern::FolderNamePattern;
use crate::resolve::{escape_literal, GlobEntry, GlobResolve, ResolveOptions};
use crate::stats::Statistics;

/// 출력 파일 이름 → 파일 경로 목록
pub type FileGroups = BTreeMap<String, Vec<PathBuf>>;

/// 실행 동안 고정되는 버킷 구성 설정
#[derive(Debug, Clone)]
pub struct GroupingRules {
    pub pattern: FolderNamePattern,
    pub file_patterns: Vec<String>,
    pub suffix: String,
    /// 앞의 `.`이 제거된 확장자
    pub extension: String,
    pub append_suffix: bool,
    pub include_nested: bool,
    /// 설정되면 이 폴더 기준 상대 경로로 변환
    pub relative_to: Option<PathBuf>,
}

impl GroupingRules {
    /// 모듈 폴더 이름에서 출력 파일 이름 계산
    ///
    /// 접두어, 끝의 `.확장자`, 끝의 접미어를 차례로 제거한 뒤
    /// (설정에 따라) 접미어와 `.확장자`를 붙입니다.
    pub fn output_file_name(&self, folder: &Path) -> String {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = self.pattern.strip_prefix(&folder_name);
        let dotted_extension = format!(".{}", self.extension);
        let name = name.strip_suffix(dotted_extension.as_str()).unwrap_or(name);
        let name = name.strip_suffix(self.suffix.as_str()).unwrap_or(name);

        let suffix = if self.append_suffix { self.suffix.as_str() } else { "" };
        format!("{}{}.{}", name, suffix, self.extension)
    }

    /// 모듈 폴더의 파일을 모으는 glob 목록
    ///
    /// 이름이 `!`로 시작하는 파일/폴더는 검색 기준 아래 어느 깊이에서든 제외됩니다.
    pub fn file_globs(&self, base: &SearchingBase, folder: &Path) -> Vec<GlobEntry> {
        let folder_glob = escape_literal(&folder.to_string_lossy());
        let mut globs: Vec<GlobEntry> = self
            .file_patterns
            .iter()
            .map(|p| GlobEntry::Include(format!("{}/**/{}", folder_glob, p)))
            .collect();

        if !self.include_nested {
            globs.push(GlobEntry::Exclude(format!(
                "{}/**/{}/**/*",
                folder_glob,
                self.pattern.shallow_pattern()
            )));
        }

        let root = base.anchored();
        globs.push(GlobEntry::Exclude(format!("{}**/!*", root)));
        globs.push(GlobEntry::Exclude(format!("{}**/!*/**/*", root)));

        globs
    }

    fn present(&self, path: PathBuf) -> PathBuf {
        match &self.relative_to {
            Some(cwd) => match path.strip_prefix(cwd) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => path,
            },
            None => path,
        }
    }
}

/// 실행 전체에서 공유되는 결과 누적기
#[derive(Debug, Default)]
pub struct OutputBuckets {
    groups: FileGroups,
    /// 출력 이름별 원본 폴더
    origins: HashMap<String, PathBuf>,
    stats: Statistics,
}

impl OutputBuckets {
    pub fn new() -> Self {
        Self {
            stats: Statistics::new(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut Statistics {
        &mut self.stats
    }

    pub fn into_groups(self) -> FileGroups {
        self.groups
    }

    /// 출력 이름을 예약하기 전에 충돌 검사
    pub fn check_available(&self, name: &str, folder: &Path) -> Result<()> {
        match self.origins.get(name) {
            Some(first) => Err(GroupingError::DuplicateOutputFile {
                name: name.to_string(),
                first: first.clone(),
                second: folder.to_path_buf(),
            }),
            None => Ok(()),
        }
    }

    /// 버킷 등록
    pub fn insert(&mut self, name: String, folder: &Path, files: Vec<PathBuf>) -> Result<()> {
        self.check_available(&name, folder)?;
        self.stats.add_module_folder(files.len());
        self.origins.insert(name.clone(), folder.to_path_buf());
        self.groups.insert(name, files);
        Ok(())
    }
}

/// 모듈 폴더 하나를 버킷으로 등록
pub fn group_folder<R>(
    base: &SearchingBase,
    folder: &Path,
    rules: &GroupingRules,
    resolver: &R,
    buckets: &mut OutputBuckets,
    logger: &Logger,
) -> Result<()>
where
    R: GlobResolve + ?Sized,
{
    let name = rules.output_file_name(folder);
    buckets.check_available(&name, folder)?;

    let globs = rules.file_globs(base, folder);
    let options = ResolveOptions::new().with_nodir(true).with_sort(true);
    let files: Vec<PathBuf> = resolver
        .resolve(&globs, &options)?
        .into_iter()
        .map(|path| rules.present(path))
        .collect();

    logger.detail(|| format!("[{}]에 매칭된 파일: {}", name, format_json(&files)));

    buckets.insert(name, folder, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> GroupingRules {
        GroupingRules {
            pattern: FolderNamePattern::default(),
            file_patterns: vec!["*".to_string()],
            suffix: String::new(),
            extension: "css".to_string(),
            append_suffix: true,
            include_nested: false,
            relative_to: None,
        }
    }

    #[test]
    fn test_output_file_name_basic() {
        let rules = rules();
        assert_eq!(
            rules.output_file_name(Path::new("/w/src/concat-into=app.js")),
            "app.js.css"
        );
        assert_eq!(
            rules.output_file_name(Path::new("/w/src/concat-into=app.css")),
            "app.css"
        );
    }

    #[test]
    fn test_output_file_name_with_suffix() {
        let mut rules = rules();
        rules.suffix = ".min".to_string();
        assert_eq!(
            rules.output_file_name(Path::new("/w/concat-into=app")),
            "app.min.css"
        );
        assert_eq!(
            rules.output_file_name(Path::new("/w/concat-into=app.min.css")),
            "app.min.css"
        );

        rules.append_suffix = false;
        assert_eq!(
            rules.output_file_name(Path::new("/w/concat-into=app.min")),
            "app.css"
        );
    }

    #[test]
    fn test_output_file_name_with_empty_extension() {
        let mut rules = rules();
        rules.extension = String::new();
        assert_eq!(rules.output_file_name(Path::new("/w/concat-into=app")), "app.");
        assert_eq!(rules.output_file_name(Path::new("/w/concat-into=app.")), "app.");
    }

    #[test]
    fn test_file_globs() {
        let rules = GroupingRules {
            file_patterns: vec!["*.css".to_string(), "*.less".to_string()],
            ..rules()
        };
        let base = SearchingBase::new("src/", Path::new("/w"));
        let globs = rules.file_globs(&base, Path::new("/w/src/concat-into=a"));

        assert_eq!(
            globs,
            vec![
                GlobEntry::Include("/w/src/concat-into=a/**/*.css".to_string()),
                GlobEntry::Include("/w/src/concat-into=a/**/*.less".to_string()),
                GlobEntry::Exclude("/w/src/concat-into=a/**/concat-into=*/**/*".to_string()),
                GlobEntry::Exclude("/w/src/**/!*".to_string()),
                GlobEntry::Exclude("/w/src/**/!*/**/*".to_string()),
            ]
        );
    }

    #[test]
    fn test_file_globs_with_nested_entries() {
        let rules = GroupingRules {
            include_nested: true,
            ..rules()
        };
        let base = SearchingBase::new("src/", Path::new("/w"));
        let globs = rules.file_globs(&base, Path::new("/w/src/concat-into=a"));
        assert_eq!(globs.iter().filter(|g| g.is_exclude()).count(), 2);
    }

    #[test]
    fn test_collision_is_detected() {
        let mut buckets = OutputBuckets::new();
        buckets
            .insert("app.css".to_string(), Path::new("/a/concat-into=app"), vec![])
            .unwrap();

        let result = buckets.insert(
            "app.css".to_string(),
            Path::new("/b/concat-into=app"),
            vec![PathBuf::from("/b/x.css")],
        );

        match result {
            Err(GroupingError::DuplicateOutputFile { name, first, second }) => {
                assert_eq!(name, "app.css");
                assert_eq!(first, PathBuf::from("/a/concat-into=app"));
                assert_eq!(second, PathBuf::from("/b/concat-into=app"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(buckets.len(), 1);
        assert!(!buckets.is_empty());
        assert_eq!(buckets.stats().matched_files, 0);
    }

    #[test]
    fn test_relative_presentation() {
        let rules = GroupingRules {
            relative_to: Some(PathBuf::from("/w")),
            ..rules()
        };
        assert_eq!(
            rules.present(PathBuf::from("/w/src/a.css")),
            PathBuf::from("src/a.css")
        );
        assert_eq!(
            rules.present(PathBuf::from("/elsewhere/a.css")),
            PathBuf::from("/elsewhere/a.css")
        );
    }
}
