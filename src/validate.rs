//! 입력 검증 모듈
//!
//! 검색 기준 glob과 파일 매칭 패턴을 실행 전에 한 번 걸러냅니다.

use crate::error::{GroupingError, Result};
use crate::log::{format_json, Logger};

/// 파일 매칭 패턴이 하나도 유효하지 않을 때 사용하는 패턴
pub const MATCH_ALL_PATTERN: &str = "*";

/// 검색 기준 glob 검증
///
/// 부정 glob(`!`로 시작)이나 구분자로 끝나지 않는 항목은 경고 후 건너뜁니다.
/// 남는 항목이 없으면 치명적 에러입니다. 입력 순서는 유지됩니다.
///
/// # Examples
/// ```
/// use fgroup::log::Logger;
/// use fgroup::validate::validate_searching_bases;
///
/// let input = vec![" src/ ".to_string(), "!lib/".to_string(), "docs".to_string()];
/// let valid = validate_searching_bases(&input, &Logger::silent()).unwrap();
/// assert_eq!(valid, vec!["src/"]);
/// ```
pub fn validate_searching_bases(input: &[String], logger: &Logger) -> Result<Vec<String>> {
    let mut valid_items = Vec::new();

    for raw in input {
        let base = raw.trim();

        if base.starts_with('!') {
            logger.warn(&format!(
                "유효하지 않은 검색 기준 glob \"{}\". 건너뜁니다. 부정 glob은 지원하지 않습니다.",
                base
            ));
            continue;
        }

        if !base.ends_with(['/', '\\']) {
            logger.warn(&format!(
                "유효하지 않은 검색 기준 glob \"{}\". 건너뜁니다. \
                 검색 기준은 반드시 \"/\" 또는 \"\\\"로 끝나야 합니다.",
                base
            ));
            continue;
        }

        valid_items.push(base.to_string());
    }

    if valid_items.is_empty() {
        return Err(GroupingError::NoValidSearchingBases {
            input: format_json(input),
        });
    }

    logger.detail(|| format!("유효한 검색 기준 glob 목록: {}", format_json(&valid_items)));

    Ok(valid_items)
}

/// 파일 매칭 패턴이 사용할 수 있는 형식인지 확인
fn is_valid_file_pattern(pattern: &str) -> bool {
    !pattern.trim().is_empty() && !pattern.contains(['/', '\\']) && !pattern.contains("**")
}

/// 파일 매칭 패턴 검증
///
/// 빈 문자열, 경로 구분자를 포함한 항목, `*`가 두 개 이상 연속된 항목은
/// 건너뜁니다. 남는 항목이 없으면 경고 후 `["*"]`를 반환하므로 실패하지 않습니다.
pub fn validate_file_matching_patterns(input: &[String], logger: &Logger) -> Vec<String> {
    let mut valid_items = Vec::new();

    for item in input {
        if !is_valid_file_pattern(item) {
            logger.warn(&format!("유효하지 않은 파일 매칭 glob \"{}\"", item));
            continue;
        }
        valid_items.push(item.trim().to_string());
    }

    if valid_items.is_empty() {
        logger.warn(&format!(
            "유효한 파일 매칭 glob이 없습니다! 모든 파일을 매칭합니다. 입력값: {}",
            format_json(input)
        ));
        return vec![MATCH_ALL_PATTERN.to_string()];
    }

    valid_items
}
