//! 실행 총괄 모듈
//!
//! 입력 검증 → 검색 기준별 모듈 폴더 탐색 → 폴더별 버킷 구성 순으로 진행합니다.

use std::env;
use std::path::PathBuf;

use crate::error::{GroupingError, Result};
use crate::folders::{resolve_module_folders, SearchingBase};
use crate::grouper::{group_folder, FileGroups, GroupingRules, OutputBuckets};
use crate::log::Logger;
use crate::options::GroupingOptions;
use crate::pattern::FolderNamePattern;
use crate::resolve::{FsGlobResolver, GlobResolve};
use crate::validate::{validate_file_matching_patterns, validate_searching_bases};

/// 작업 폴더 결정 (지정값이 상대 경로면 현재 폴더 기준으로 고정)
fn working_dir(options: &GroupingOptions) -> Result<PathBuf> {
    let current = || {
        env::current_dir().map_err(|e| GroupingError::WorkingDirUnavailable {
            reason: e.to_string(),
        })
    };

    match &options.working_dir {
        Some(dir) if dir.is_absolute() => Ok(dir.clone()),
        Some(dir) => Ok(current()?.join(dir)),
        None => current(),
    }
}

/// `.`을 떼고 남은 확장자가 비어 있으면 경고 (경고했으면 true)
fn warn_if_extension_missing(options: &GroupingOptions, logger: &Logger) -> bool {
    let missing = options.normalized_extension().is_empty();
    if missing {
        logger.warn("출력 파일 확장자가 지정되지 않았습니다!");
    }
    missing
}

/// 폴더 규칙에 따라 파일을 출력 파일별로 묶기
///
/// 기본 파일 시스템 해석기를 사용하며, `should_log` 설정에 따라 상세 로그를 출력합니다.
///
/// # Arguments
/// * `options` - 실행 옵션
///
/// # Returns
/// 출력 파일 이름 → 파일 경로 목록, 또는 치명적 에러 (부분 결과 없음)
pub fn evaluate_file_groups(options: &GroupingOptions) -> Result<FileGroups> {
    let logger = Logger::new(options.should_log);
    evaluate_with(options, &FsGlobResolver::new(), &logger).map(OutputBuckets::into_groups)
}

/// 해석기와 로그 출력기를 지정하여 실행
pub fn evaluate_with<R>(
    options: &GroupingOptions,
    resolver: &R,
    logger: &Logger,
) -> Result<OutputBuckets>
where
    R: GlobResolve + ?Sized,
{
    let searching_bases = validate_searching_bases(&options.searching_bases, logger)?;
    let file_patterns = validate_file_matching_patterns(&options.file_matching_patterns, logger);
    let pattern = FolderNamePattern::parse(options.folder_name_pattern.as_deref())?;

    warn_if_extension_missing(options, logger);

    let cwd = working_dir(options)?;
    let rules = GroupingRules {
        pattern,
        file_patterns,
        suffix: options.output_file_name_suffix.clone(),
        extension: options.normalized_extension().to_string(),
        append_suffix: !options.should_not_append_suffix,
        include_nested: options.should_include_nested_entries,
        relative_to: options
            .should_evaluate_relative_path_to_cwd
            .then(|| cwd.clone()),
    };

    let mut buckets = OutputBuckets::new();

    for raw in &searching_bases {
        let base = SearchingBase::new(raw, &cwd);
        let folders = resolve_module_folders(
            &base,
            &rules.pattern,
            rules.include_nested,
            resolver,
            logger,
        )?;

        for folder in &folders {
            group_folder(&base, folder, &rules, resolver, &mut buckets, logger)?;
        }
        buckets.stats_mut().add_searching_base();
    }

    logger.info(&buckets.stats().summary_line(options.task_name()));
    logger.detail(|| buckets.stats().detail_line());

    Ok(buckets)
}
