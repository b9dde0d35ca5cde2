//! 폴더 이름 규칙 패턴 모듈
//!
//! `concat-into=*` 같은 원시 패턴을 정규화하여 접두어와
//! 폴더 탐색용 glob 조각들을 만들어 냅니다.

use crate::error::{GroupingError, Result};
use crate::resolve::escape_literal;

/// 패턴이 주어지지 않았을 때 사용하는 기본 폴더 이름 규칙
pub const DEFAULT_FOLDER_NAME_PATTERN: &str = "concat-into=*";

/// 정규화된 폴더 이름 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNamePattern {
    prefix: String,
    shallow_pattern: String,
    deep_pattern: String,
}

impl FolderNamePattern {
    /// 원시 패턴을 정규화
    ///
    /// # Arguments
    /// * `raw` - 원시 패턴 문자열 (None이거나 공백뿐이면 기본값 사용)
    ///
    /// # Returns
    /// 정규화된 `FolderNamePattern` 또는 에러
    ///
    /// # Examples
    /// ```
    /// use fgroup::pattern::FolderNamePattern;
    ///
    /// let pattern = FolderNamePattern::parse(Some("/bundle-as=*/")).unwrap();
    /// assert_eq!(pattern.prefix(), "bundle-as=");
    /// assert_eq!(pattern.deep_pattern(), "**/bundle-as=*/");
    /// assert!(FolderNamePattern::parse(Some("a*b*")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        let evaluated = if trimmed.is_empty() {
            DEFAULT_FOLDER_NAME_PATTERN
        } else {
            trimmed
        };

        let without_separators = evaluated.trim_matches(|c| c == '/' || c == '\\');
        let prefix = without_separators
            .strip_suffix('*')
            .unwrap_or(without_separators);

        if prefix.contains(['/', '\\', '*', '?']) {
            return Err(GroupingError::InvalidFolderNamePattern {
                pattern: evaluated.to_string(),
            });
        }

        let shallow_pattern = format!("{}*", escape_literal(prefix));
        let deep_pattern = format!("**/{}/", shallow_pattern);

        Ok(Self {
            prefix: prefix.to_string(),
            shallow_pattern,
            deep_pattern,
        })
    }

    /// 리터럴 접두어
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 바로 아래 단계의 모듈 폴더와 일치하는 glob 조각 (`접두어*`)
    pub fn shallow_pattern(&self) -> &str {
        &self.shallow_pattern
    }

    /// 임의 깊이의 모듈 폴더와 일치하는 glob 조각 (`**/접두어*/`)
    pub fn deep_pattern(&self) -> &str {
        &self.deep_pattern
    }

    /// 폴더 이름이 접두어로 시작하는지 확인
    pub fn is_match(&self, folder_name: &str) -> bool {
        folder_name.starts_with(&self.prefix)
    }

    /// 폴더 이름 앞의 접두어 제거
    pub fn strip_prefix<'a>(&self, folder_name: &'a str) -> &'a str {
        folder_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(folder_name)
    }
}

impl Default for FolderNamePattern {
    fn default() -> Self {
        // 기본 패턴은 항상 유효함
        Self {
            prefix: "concat-into=".to_string(),
            shallow_pattern: "concat-into=*".to_string(),
            deep_pattern: "**/concat-into=*/".to_string(),
        }
    }
}
