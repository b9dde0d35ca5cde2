//! fgroup - FOLDERS AS A MODULE
//!
//! 이름 규칙(기본값 `concat-into=*`)에 맞는 폴더를 "가상 모듈"로 보고,
//! 그 아래 파일들을 폴더 이름에서 계산한 출력 파일별로 묶어주는 빌드 보조 도구입니다.
//! 파일 내용을 읽거나 실제로 합치지는 않습니다.
//!
//! # 주요 기능
//!
//! - 📂 **폴더 규칙 탐색**: 검색 기준 아래 임의 깊이의 모듈 폴더 탐색
//! - 🧩 **중첩 제어**: 모듈 폴더 안의 모듈 폴더 포함/제외
//! - 🙈 **숨김 규칙**: 이름이 `!`로 시작하는 파일/폴더는 항상 제외
//! - 🛑 **충돌 검사**: 서로 다른 폴더가 같은 출력 이름을 만들면 즉시 중단
//! - 🎨 **컬러 로그**: 상세 진단 메시지와 실행 요약
//!
//! # 예제
//!
//! ```bash
//! # src/ 아래 concat-into=* 폴더들을 css 번들로 묶기
//! fgroup -b src/ -f "*.css" -e css --pretty
//!
//! # 옵션 파일 사용, 상대 경로로 출력
//! fgroup -c groups.json --relative -o groups.out.json
//! ```

pub mod cli;
pub mod error;
pub mod evaluate;
pub mod folders;
pub mod grouper;
pub mod log;
pub mod options;
pub mod pattern;
pub mod resolve;
pub mod stats;
pub mod validate;

// Re-exports for convenient access
pub use cli::Args;
pub use error::{GroupingError, Result};
pub use evaluate::{evaluate_file_groups, evaluate_with};
pub use grouper::{FileGroups, OutputBuckets};
pub use log::Logger;
pub use options::GroupingOptions;
pub use pattern::FolderNamePattern;
pub use resolve::{FsGlobResolver, GlobEntry, GlobResolve, ResolveOptions};
pub use stats::Statistics;
