//! 에러 타입 정의 모듈
//!
//! fgroup 실행을 중단시키는 치명적 에러 타입을 정의합니다.
//! 경고 수준의 문제는 에러가 아니라 로그로만 보고됩니다.

use std::path::PathBuf;
use thiserror::Error;

/// fgroup에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum GroupingError {
    /// 검증을 통과한 검색 기준 glob이 하나도 없음
    #[error("유효한 검색 기준 glob이 하나도 없습니다. 입력값: {input}")]
    NoValidSearchingBases { input: String },

    /// 폴더 이름 규칙 패턴이 잘못됨
    #[error(
        "폴더 이름 규칙 패턴 (\"{pattern}\")이 유효하지 않습니다. \
         중간에 \"\\\", \"/\", \"?\", \"*\"를 포함할 수 없고, 끝의 \"*\"는 하나만 허용됩니다"
    )]
    InvalidFolderNamePattern { pattern: String },

    /// 서로 다른 폴더가 같은 출력 파일 이름을 만듦
    #[error("출력 파일 이름이 중복되었습니다: \"{name}\" ({first:?} / {second:?})")]
    DuplicateOutputFile {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// glob 엔진이 표현식을 거부함
    #[error("유효하지 않은 glob 표현식 ({pattern}): {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// 현재 작업 폴더를 알 수 없음
    #[error("현재 작업 폴더를 확인할 수 없습니다: {reason}")]
    WorkingDirUnavailable { reason: String },
}

/// fgroup 결과 타입 별칭
pub type Result<T> = std::result::Result<T, GroupingError>;
