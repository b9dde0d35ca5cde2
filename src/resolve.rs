//! glob 해석 모듈
//!
//! 포함/제외 glob 목록을 실제 경로 목록으로 해석합니다.
//! 제외 표현식은 `!` 접두어 문자열 대신 `GlobEntry::Exclude`로 표현하며,
//! 문자열 형식과의 변환은 이 모듈 경계에서만 이루어집니다.

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GroupingError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// 리터럴 문자열을 glob에 넣기 위해 메타문자를 이스케이프
///
/// 접두어, 작업 폴더, 탐색된 폴더 경로 등 사용자 입력을 glob에 넣을 때는
/// 항상 이 함수를 거칩니다.
///
/// # Examples
/// ```
/// use fgroup::resolve::escape_literal;
///
/// assert_eq!(escape_literal("concat-into="), "concat-into=");
/// assert_eq!(escape_literal("a[1]*"), "a[[]1[]][*]");
/// ```
pub fn escape_literal(text: &str) -> String {
    Pattern::escape(text)
}

/// 포함 또는 제외 glob 표현식
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobEntry {
    Include(String),
    Exclude(String),
}

impl GlobEntry {
    /// `!` 접두어 문자열 형식에서 변환
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix('!') {
            Some(rest) => GlobEntry::Exclude(rest.to_string()),
            None => GlobEntry::Include(text.to_string()),
        }
    }

    /// 표현식 본문 (`!` 제외)
    pub fn pattern(&self) -> &str {
        match self {
            GlobEntry::Include(p) | GlobEntry::Exclude(p) => p,
        }
    }

    pub fn is_exclude(&self) -> bool {
        matches!(self, GlobEntry::Exclude(_))
    }
}

impl fmt::Display for GlobEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobEntry::Include(p) => write!(f, "{}", p),
            GlobEntry::Exclude(p) => write!(f, "!{}", p),
        }
    }
}

/// glob 해석 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// 폴더는 결과에서 제외
    pub nodir: bool,
    /// 결과를 경로 순으로 정렬
    pub sort: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            nodir: false,
            sort: true,
        }
    }
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodir(mut self, nodir: bool) -> Self {
        self.nodir = nodir;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }
}

/// glob 목록을 경로 목록으로 해석하는 동기 인터페이스
pub trait GlobResolve {
    fn resolve(&self, globs: &[GlobEntry], options: &ResolveOptions) -> Result<Vec<PathBuf>>;
}

/// 파일 시스템을 직접 탐색하는 기본 glob 해석기
///
/// 상대 glob은 `base_dir`(없으면 프로세스 현재 폴더) 기준으로 해석되며,
/// 결과도 그 폴더 기준 상대 경로로 돌려줍니다.
#[derive(Debug, Clone, Default)]
pub struct FsGlobResolver {
    base_dir: Option<PathBuf>,
}

impl FsGlobResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 상대 glob의 기준 폴더 지정
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }
}

/// 컴파일된 glob 표현식
struct CompiledGlob {
    pattern: Pattern,
    /// 끝이 구분자라서 폴더만 일치해야 하는지 여부
    dir_only: bool,
    /// 와일드카드가 없는 앞부분 경로
    walk_root: PathBuf,
    /// `**`가 없을 때 탐색 깊이 상한
    max_depth: Option<usize>,
}

impl CompiledGlob {
    fn compile(text: &str) -> Result<Self> {
        let dir_only = text.ends_with(['/', '\\']);
        let body = text.trim_end_matches(['/', '\\']);
        // 루트("/") 자체를 가리키는 경우
        let body = if body.is_empty() && dir_only { "/" } else { body };

        let pattern = Pattern::new(body).map_err(|e| GroupingError::InvalidGlob {
            pattern: text.to_string(),
            reason: e.to_string(),
        })?;

        let (walk_root, rest) = split_literal_root(body);
        let max_depth = if rest.iter().any(|segment| segment.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Ok(Self {
            pattern,
            dir_only,
            walk_root,
            max_depth,
        })
    }

    fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.pattern.matches_path_with(path, MATCH_OPTIONS)
    }
}

/// 와일드카드가 없는 구간이면 이스케이프를 푼 리터럴 문자열 반환
///
/// `escape_literal`이 만드는 한 글자 문자 클래스(`[[]`, `[*]`, `[?]`, `[]]`)는
/// 리터럴로 취급합니다.
fn literal_segment(segment: &str) -> Option<String> {
    let mut literal = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(c) = chars.next() {
        match c {
            '*' | '?' => return None,
            '[' => match (chars.next(), chars.next()) {
                (Some(inner), Some(']')) if inner != '!' => literal.push(inner),
                _ => return None,
            },
            _ => literal.push(c),
        }
    }

    Some(literal)
}

/// 표현식을 와일드카드 없는 앞부분 경로와 나머지 구간으로 분리
fn split_literal_root(body: &str) -> (PathBuf, Vec<&str>) {
    let mut root = String::new();
    let mut segments = body.split(['/', '\\']).peekable();

    if body.starts_with(['/', '\\']) {
        root.push('/');
        segments.next();
    }

    let mut literal_count = 0;
    while let Some(literal) = segments.peek().and_then(|segment| literal_segment(segment)) {
        if literal_count > 0 && !root.ends_with('/') {
            root.push('/');
        }
        root.push_str(&literal);
        literal_count += 1;
        segments.next();
    }

    let root = if root.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(root)
    };
    (root, segments.collect())
}

impl GlobResolve for FsGlobResolver {
    fn resolve(&self, globs: &[GlobEntry], options: &ResolveOptions) -> Result<Vec<PathBuf>> {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();
        for entry in globs {
            let compiled = CompiledGlob::compile(entry.pattern())?;
            if entry.is_exclude() {
                excludes.push(compiled);
            } else {
                includes.push(compiled);
            }
        }

        let origin = self.base_dir.as_deref().unwrap_or(Path::new("."));
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for include in &includes {
            let relative = include.walk_root.is_relative();
            let walk_from = if relative {
                origin.join(&include.walk_root)
            } else {
                include.walk_root.clone()
            };

            let mut walker = WalkDir::new(walk_from);
            if let Some(depth) = include.max_depth {
                walker = walker.max_depth(depth);
            }

            let entries = walker
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| (e.file_type().is_dir(), e.into_path()))
                .filter_map(|(is_dir, path)| {
                    if !relative {
                        return Some((is_dir, path));
                    }
                    // 상대 glob은 기준 폴더를 뗀 경로로 매칭
                    let stripped = path.strip_prefix(origin).ok()?.to_path_buf();
                    (!stripped.as_os_str().is_empty()).then_some((is_dir, stripped))
                });

            for (is_dir, path) in entries {
                if options.nodir && is_dir {
                    continue;
                }
                if !include.matches(&path, is_dir) {
                    continue;
                }
                if excludes.iter().any(|exclude| exclude.matches(&path, is_dir)) {
                    continue;
                }
                if seen.insert(path.clone()) {
                    found.push(path);
                }
            }
        }

        if options.sort {
            found.sort();
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn root_glob(dir: &TempDir) -> String {
        format!("{}/", escape_literal(&dir.path().to_string_lossy()))
    }

    #[test]
    fn test_glob_entry_string_form() {
        assert_eq!(
            GlobEntry::parse("!a/**"),
            GlobEntry::Exclude("a/**".to_string())
        );
        assert_eq!(GlobEntry::parse("a/*"), GlobEntry::Include("a/*".to_string()));
        assert_eq!(GlobEntry::Exclude("x".to_string()).to_string(), "!x");
        assert_eq!(GlobEntry::Include("x".to_string()).to_string(), "x");
    }

    #[test]
    fn test_split_literal_root() {
        let (root, rest) = split_literal_root("/a/b/**/c*");
        assert_eq!(root, PathBuf::from("/a/b"));
        assert_eq!(rest, vec!["**", "c*"]);

        let (root, rest) = split_literal_root("/a/b");
        assert_eq!(root, PathBuf::from("/a/b"));
        assert!(rest.is_empty());

        let (root, rest) = split_literal_root("*.css");
        assert_eq!(root, PathBuf::from("."));
        assert_eq!(rest, vec!["*.css"]);
    }

    #[test]
    fn test_split_literal_root_with_escaped_segments() {
        let (root, rest) = split_literal_root("/tmp/x/w[[]1[]]/src/**/concat-into=*");
        assert_eq!(root, PathBuf::from("/tmp/x/w[1]/src"));
        assert_eq!(rest, vec!["**", "concat-into=*"]);

        let (root, rest) = split_literal_root("/a/[*]b/c[0-9]/d");
        assert_eq!(root, PathBuf::from("/a/*b"));
        assert_eq!(rest, vec!["c[0-9]", "d"]);
    }

    #[test]
    fn test_literal_segment() {
        assert_eq!(literal_segment("plain").as_deref(), Some("plain"));
        assert_eq!(literal_segment("[[]x[]][?]").as_deref(), Some("[x]?"));
        assert_eq!(literal_segment("a*"), None);
        assert_eq!(literal_segment("[ab]"), None);
        assert_eq!(literal_segment("[!]"), None);
    }

    #[test]
    fn test_escaped_root_is_resolved() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("w[1]/src/concat-into=app/a.css"));

        let root = escape_literal(&format!("{}/w[1]/src", dir.path().to_string_lossy()));
        let globs = vec![GlobEntry::Include(format!("{}/**/*.css", root))];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new().with_nodir(true))
            .unwrap();

        assert_eq!(
            found,
            vec![dir.path().join("w[1]/src/concat-into=app/a.css")]
        );
    }

    #[test]
    fn test_relative_wildcard_first_glob() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("x/a.css"));
        touch(&dir.path().join("y/b.js"));

        let globs = vec![GlobEntry::Include("*/a.css".to_string())];
        let found = FsGlobResolver::new()
            .with_base_dir(dir.path())
            .resolve(&globs, &ResolveOptions::new().with_nodir(true))
            .unwrap();

        assert_eq!(found, vec![PathBuf::from("x/a.css")]);
    }

    #[test]
    fn test_relative_glob_with_exclude() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("m/a.css"));
        touch(&dir.path().join("m/!b.css"));

        let globs = vec![
            GlobEntry::Include("m/**/*".to_string()),
            GlobEntry::Exclude("**/!*".to_string()),
        ];
        let found = FsGlobResolver::new()
            .with_base_dir(dir.path())
            .resolve(&globs, &ResolveOptions::new().with_nodir(true))
            .unwrap();

        assert_eq!(found, vec![PathBuf::from("m/a.css")]);
    }

    #[test]
    fn test_directory_only_glob() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("x/concat-into=a")).unwrap();
        touch(&dir.path().join("concat-into=file"));

        let globs = vec![GlobEntry::Include(format!(
            "{}**/concat-into=*/",
            root_glob(&dir)
        ))];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new())
            .unwrap();

        assert_eq!(found, vec![dir.path().join("x/concat-into=a")]);
    }

    #[test]
    fn test_exclude_and_nodir() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("m/b.css"));
        touch(&dir.path().join("m/a.css"));
        touch(&dir.path().join("m/!skip.css"));
        touch(&dir.path().join("m/!hidden/c.css"));
        touch(&dir.path().join("m/sub/d.css"));

        let root = root_glob(&dir);
        let globs = vec![
            GlobEntry::Include(format!("{}m/**/*", root)),
            GlobEntry::Exclude(format!("{}**/!*", root)),
            GlobEntry::Exclude(format!("{}**/!*/**/*", root)),
        ];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new().with_nodir(true))
            .unwrap();

        assert_eq!(
            found,
            vec![
                dir.path().join("m/a.css"),
                dir.path().join("m/b.css"),
                dir.path().join("m/sub/d.css"),
            ]
        );
    }

    #[test]
    fn test_overlapping_includes_are_deduplicated() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.css"));

        let root = root_glob(&dir);
        let globs = vec![
            GlobEntry::Include(format!("{}**/*", root)),
            GlobEntry::Include(format!("{}**/*.css", root)),
        ];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new().with_nodir(true))
            .unwrap();

        assert_eq!(found, vec![dir.path().join("a.css")]);
    }

    #[test]
    fn test_literal_root_include() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("concat-into=x/concat-into=y")).unwrap();

        let globs = vec![GlobEntry::Include(format!("{}concat-into=x/", root_glob(&dir)))];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new())
            .unwrap();

        assert_eq!(found, vec![dir.path().join("concat-into=x")]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let globs = vec![GlobEntry::Include(format!("{}nope/**/*", root_glob(&dir)))];
        let found = FsGlobResolver::new()
            .resolve(&globs, &ResolveOptions::new())
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let globs = vec![GlobEntry::Include("/tmp/[unclosed".to_string())];
        let result = FsGlobResolver::new().resolve(&globs, &ResolveOptions::new());
        assert!(matches!(result, Err(GroupingError::InvalidGlob { .. })));
    }
}
