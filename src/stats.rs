//! 통계 모듈
//!
//! 한 번의 실행 동안 매칭된 폴더/파일 수를 집계합니다.

use std::time::{Duration, Instant};

/// 실행 통계 구조체
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// 처리한 검색 기준 수
    pub searching_bases: usize,
    /// 매칭된 모듈 폴더 수
    pub module_folders: usize,
    /// 매칭된 파일 수
    pub matched_files: usize,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn add_searching_base(&mut self) {
        self.searching_bases += 1;
    }

    /// 모듈 폴더 하나와 그 파일 수를 반영
    pub fn add_module_folder(&mut self, file_count: usize) {
        self.module_folders += 1;
        self.matched_files += file_count;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 실행 요약 한 줄
    ///
    /// # Examples
    /// ```
    /// use fgroup::stats::Statistics;
    ///
    /// let mut stats = Statistics::new();
    /// stats.add_module_folder(1);
    /// assert_eq!(stats.summary_line("styles"), "styles matched 1 file in total.");
    /// ```
    pub fn summary_line(&self, task_name: &str) -> String {
        let noun = if self.matched_files == 1 { "file" } else { "files" };
        format!(
            "{} matched {} {} in total.",
            task_name, self.matched_files, noun
        )
    }

    /// 상세 요약 (폴더 수, 처리 시간 포함)
    pub fn detail_line(&self) -> String {
        format!(
            "검색 기준 {}개, 모듈 폴더 {}개, 처리 시간 {}",
            self.searching_bases,
            self.module_folders,
            format_duration(self.elapsed())
        )
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
