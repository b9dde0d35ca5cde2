//! 로그 출력 모듈
//!
//! 컬러 진단 메시지를 stderr로 출력합니다. stdout은 결과 JSON 전용입니다.

use colored::Colorize;
use serde::Serialize;

/// 모든 로그 줄 앞에 붙는 캡션
pub const CAPTION: &str = "folders-as-a-module: ";

/// 로그 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Plain,
    Info,
    Warn,
    Error,
}

/// 진단용 로그 출력기
///
/// 반환값이 없는 출력 전용 객체입니다. `verbose`가 꺼져 있으면
/// 상세 메시지만 생략되고, 경고와 요약은 `quiet`일 때만 숨겨집니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
    quiet: bool,
}

impl Logger {
    /// 새 로그 출력기 생성
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    /// 아무것도 출력하지 않는 로그 출력기
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    /// quiet 모드 설정
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// 상세 로그 활성화 여부
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn emit(&self, level: LogLevel, message: &str) {
        if self.quiet {
            return;
        }

        let line = match level {
            LogLevel::Plain => format!("{}{}", CAPTION, message),
            LogLevel::Info => format!("{}{}", CAPTION.bright_cyan(), message.cyan()),
            LogLevel::Warn => format!("{}{}", CAPTION.bright_yellow(), message.yellow()),
            LogLevel::Error => format!("{}{}", CAPTION.bright_red(), message.red()),
        };
        eprintln!("{}", line);
    }

    pub fn log(&self, message: &str) {
        self.emit(LogLevel::Plain, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }

    /// `verbose`일 때만 평문 로그 출력
    ///
    /// 메시지 생성 비용을 피하기 위해 클로저로 받습니다.
    pub fn detail<F>(&self, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.is_verbose() {
            self.log(&message());
        }
    }
}

/// 임의의 값을 보기 좋은 JSON 문자열로 변환
///
/// # Examples
/// ```
/// use fgroup::log::format_json;
///
/// assert_eq!(format_json(&vec!["src/"]), "[\n  \"src/\"\n]");
/// ```
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<직렬화 실패: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_string_list() {
        let items = vec!["a/".to_string(), "b/".to_string()];
        let text = format_json(&items);
        assert!(text.starts_with('['));
        assert!(text.contains("\"a/\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_silent_logger_is_never_verbose() {
        assert!(!Logger::silent().is_verbose());
        assert!(!Logger::new(true).with_quiet(true).is_verbose());
        assert!(Logger::new(true).is_verbose());
    }

    #[test]
    fn test_detail_is_lazy_when_not_verbose() {
        let logger = Logger::new(false);
        let mut called = false;
        logger.detail(|| {
            called = true;
            String::new()
        });
        assert!(!called);
    }
}
