//! 실행 옵션 모듈
//!
//! 한 번의 실행 동안 변하지 않는 설정을 정의합니다.
//! JSON 옵션 파일에서 그대로 읽을 수 있도록 camelCase 키를 사용합니다.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// 로그에 표시할 작업 이름 기본값
pub const UNKNOWN_TASK_NAME: &str = "<unknown task>";

/// 문자열 하나 또는 (중첩된) 문자열 배열
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<OneOrMany>),
}

impl OneOrMany {
    fn flatten_into(self, out: &mut Vec<String>) {
        match self {
            OneOrMany::One(item) => out.push(item),
            OneOrMany::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

/// 문자열 또는 중첩 배열을 평탄화된 목록으로 읽기
fn flattened<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut out = Vec::new();
    if let Some(value) = Option::<OneOrMany>::deserialize(deserializer)? {
        value.flatten_into(&mut out);
    }
    Ok(out)
}

/// 폴더 묶기 실행 옵션
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupingOptions {
    /// 검색 기준 glob 목록 (구분자로 끝나야 함)
    #[serde(deserialize_with = "flattened")]
    pub searching_bases: Vec<String>,
    /// 모듈 폴더 안에서 파일을 고르는 glob 조각 목록
    #[serde(deserialize_with = "flattened")]
    pub file_matching_patterns: Vec<String>,
    /// 폴더 이름 규칙 (None이면 `concat-into=*`)
    #[serde(rename = "nameMatchingPatternForFoldersAsAModule")]
    pub folder_name_pattern: Option<String>,
    pub output_file_name_suffix: String,
    pub output_file_extension: String,
    pub should_log: bool,
    pub should_not_append_suffix: bool,
    pub should_include_nested_entries: bool,
    #[serde(
        rename = "shouldEvaluateRelativePathToCWD",
        alias = "shouldEvalutateRelativePathToCWD"
    )]
    pub should_evaluate_relative_path_to_cwd: bool,
    pub task_name_for_logging: Option<String>,
    /// 작업 폴더 지정 (None이면 프로세스 현재 폴더)
    #[serde(skip)]
    pub working_dir: Option<PathBuf>,
}

impl GroupingOptions {
    /// 검색 기준 glob으로 옵션 생성
    pub fn new<I, S>(searching_bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            searching_bases: searching_bases.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// JSON 문자열에서 옵션 읽기
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with_file_matching_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_matching_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_folder_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.folder_name_pattern = Some(pattern.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_file_name_suffix = suffix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_file_extension = extension.into();
        self
    }

    pub fn with_log(mut self, should_log: bool) -> Self {
        self.should_log = should_log;
        self
    }

    pub fn with_no_suffix(mut self, should_not_append_suffix: bool) -> Self {
        self.should_not_append_suffix = should_not_append_suffix;
        self
    }

    pub fn with_nested(mut self, should_include_nested_entries: bool) -> Self {
        self.should_include_nested_entries = should_include_nested_entries;
        self
    }

    pub fn with_relative_paths(mut self, relative: bool) -> Self {
        self.should_evaluate_relative_path_to_cwd = relative;
        self
    }

    pub fn with_task_name(mut self, name: impl Into<String>) -> Self {
        self.task_name_for_logging = Some(name.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// 로그용 작업 이름
    pub fn task_name(&self) -> &str {
        match self.task_name_for_logging.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_TASK_NAME,
        }
    }

    /// 앞의 `.`을 제거한 출력 확장자
    pub fn normalized_extension(&self) -> &str {
        self.output_file_extension.trim_start_matches('.')
    }
}
