//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 옵션 변환을 담당합니다.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::options::GroupingOptions;

/// fgroup CLI 인자 구조체
#[derive(Parser, Debug, Default)]
#[command(
    name = "fgroup",
    author = "YourName <your@email.com>",
    version,
    about = "FOLDERS AS A MODULE - 이름 규칙에 맞는 폴더 아래 파일들을 출력 파일별로 묶습니다",
    long_about = r#"
FOLDERS AS A MODULE
===================

검색 기준 폴더 아래에서 이름이 규칙(기본값 "concat-into=*")에 맞는 폴더를
찾아, 각 폴더의 파일 목록을 폴더 이름에서 계산한 출력 파일 이름으로 묶습니다.
결과는 JSON으로 출력됩니다.

특징:
  • 모듈 폴더 안의 모듈 폴더 포함/제외 선택
  • 이름이 "!"로 시작하는 파일/폴더는 항상 제외
  • 출력 이름 충돌 시 즉시 중단
  • JSON 옵션 파일 지원

예제:
  fgroup -b src/ -f "*.css" -e css
  fgroup -b src/ -b lib/ -e js -s .bundle --nested
  fgroup -c groups.json --relative --pretty -o groups.out.json
"#
)]
pub struct Args {
    /// 검색 기준 glob (반드시 "/" 또는 "\"로 끝나야 함, 여러 번 지정 가능)
    #[arg(short = 'b', long = "base")]
    pub bases: Vec<String>,

    /// 모듈 폴더 안의 파일 매칭 glob (예: "*.css", 여러 번 지정 가능)
    #[arg(short = 'f', long = "files")]
    pub file_patterns: Vec<String>,

    /// 모듈 폴더 이름 규칙 (기본값: "concat-into=*")
    #[arg(short = 'n', long)]
    pub name_pattern: Option<String>,

    /// 출력 파일 이름 접미어
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// 출력 파일 확장자
    #[arg(short, long)]
    pub ext: Option<String>,

    /// 접미어를 붙이지 않음
    #[arg(long)]
    pub no_suffix: bool,

    /// 모듈 폴더 안의 모듈 폴더도 포함
    #[arg(long)]
    pub nested: bool,

    /// 현재 폴더 기준 상대 경로로 출력
    #[arg(long)]
    pub relative: bool,

    /// 로그에 표시할 작업 이름
    #[arg(short, long)]
    pub task: Option<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 경고와 요약도 출력하지 않음
    #[arg(short, long)]
    pub quiet: bool,

    /// JSON 옵션 파일 경로 (명령줄 인자가 우선)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 결과 JSON 파일 경로 (기본값: 표준 출력)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 보기 좋은 JSON 출력
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// 옵션 파일과 명령줄 인자를 합쳐 실행 옵션 생성
    pub fn to_options(&self) -> Result<GroupingOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("옵션 파일을 읽을 수 없습니다: {:?}", path))?;
                GroupingOptions::from_json(&text)
                    .with_context(|| format!("옵션 파일 형식이 잘못되었습니다: {:?}", path))?
            }
            None => GroupingOptions::default(),
        };

        if !self.bases.is_empty() {
            options.searching_bases = self.bases.clone();
        }
        if !self.file_patterns.is_empty() {
            options.file_matching_patterns = self.file_patterns.clone();
        }
        if let Some(ref pattern) = self.name_pattern {
            options.folder_name_pattern = Some(pattern.clone());
        }
        if let Some(ref suffix) = self.suffix {
            options.output_file_name_suffix = suffix.clone();
        }
        if let Some(ref ext) = self.ext {
            options.output_file_extension = ext.clone();
        }
        if let Some(ref task) = self.task {
            options.task_name_for_logging = Some(task.clone());
        }

        options.should_not_append_suffix |= self.no_suffix;
        options.should_include_nested_entries |= self.nested;
        options.should_evaluate_relative_path_to_cwd |= self.relative;
        options.should_log |= self.verbose;

        Ok(options)
    }
}
