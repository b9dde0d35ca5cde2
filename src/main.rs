//! fgroup - FOLDERS AS A MODULE
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use fgroup::{
    cli::Args,
    evaluate::evaluate_with,
    grouper::FileGroups,
    log::Logger,
    resolve::FsGlobResolver,
};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 치명적 에러는 quiet 설정과 무관하게 출력
            Logger::default().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = args.to_options()?;
    let logger = Logger::new(options.should_log).with_quiet(args.quiet);

    let buckets = evaluate_with(&options, &FsGlobResolver::new(), &logger)?;
    if buckets.is_empty() {
        logger.warn("매칭된 모듈 폴더가 없습니다.");
    }
    let groups = buckets.into_groups();

    match args.output {
        Some(ref path) => {
            write_groups(path, &groups, args.pretty)?;
            logger.info(&format!("저장 완료: {:?}", path));
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render_groups(&mut out, &groups, args.pretty)?;
        }
    }

    Ok(())
}

/// 결과 JSON 쓰기
fn render_groups<W: Write>(out: &mut W, groups: &FileGroups, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, groups)?;
    } else {
        serde_json::to_writer(&mut *out, groups)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// 결과 JSON 파일 저장
fn write_groups(path: &Path, groups: &FileGroups, pretty: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("결과 파일을 만들 수 없습니다: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    render_groups(&mut writer, groups, pretty)
}
