//! 批处理调度
//!
//! 使用 rayon 将文件分派到工作线程并行处理，每个文件独立加载、修改、写回。
//! 文件之间唯一的共享状态是总修改计数（`AtomicUsize`）。
//!
//! # 失败处理
//!
//! - [`FailurePolicy::Continue`]（默认）：跳过失败的文件，继续处理其余文件，
//!   结束后在汇总中列出失败项
//! - [`FailurePolicy::Abort`]：遇到第一个失败即停止分派并返回该错误；
//!   已经处理完的文件不会回滚

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use rayon::prelude::*;
use serde::Serialize;
use crate::config::{EditorConfig, FailurePolicy};
use crate::discovery::find_project_files;
use crate::editor::{FileReport, ProjectEditor};
use crate::io::{FsProjectReader, FsProjectWriter, ProjectReader, ProjectWriter};
use crate::report::Reporter;
use crate::utils::{display_name, EditorError};

/// 单个失败文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// 批处理汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// 找到的项目文件数
    pub files_found: usize,
    /// 实际加载处理的文件数
    pub files_processed: usize,
    /// 有修改的文件数
    pub files_changed: usize,
    /// 所有文件修改次数之和
    pub total_changes: usize,
    pub failures: Vec<FileFailure>,
    /// 每个成功处理的文件（按路径排序）
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// 批处理调度器
pub struct BatchRunner<R, W> {
    editor: ProjectEditor<R, W>,
    value: Option<String>,
    save_requested: bool,
    failure_policy: FailurePolicy,
    jobs: Option<usize>,
}

impl BatchRunner<FsProjectReader, FsProjectWriter> {
    /// 基于文件系统读写构建
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::with_io(config, FsProjectReader, FsProjectWriter)
    }
}

impl<R: ProjectReader, W: ProjectWriter> BatchRunner<R, W> {
    pub fn new(editor: ProjectEditor<R, W>) -> Self {
        Self {
            editor,
            value: None,
            save_requested: false,
            failure_policy: FailurePolicy::Continue,
            jobs: None,
        }
    }

    /// 使用指定的读写器构建
    pub fn with_io(config: &EditorConfig, reader: R, writer: W) -> Self {
        let editor = ProjectEditor::new(reader, writer)
            .with_write_policy(config.write_policy, config.save);

        Self::new(editor)
            .with_value(config.target_value())
            .with_save_requested(config.save)
            .with_failure_policy(config.failure_policy)
            .with_jobs(config.jobs)
    }

    /// 空白值视为未设置
    pub fn with_value(mut self, value: Option<&str>) -> Self {
        self.value = value.filter(|v| !v.trim().is_empty()).map(str::to_string);
        self
    }

    pub fn with_save_requested(mut self, save: bool) -> Self {
        self.save_requested = save;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    /// 并行处理所有文件
    ///
    /// # 返回
    /// 返回汇总信息；`FailurePolicy::Abort` 下返回第一个单文件错误
    pub fn run(&self, files: &[PathBuf], reporter: &dyn Reporter) -> Result<BatchSummary, EditorError> {
        let mut summary = match self.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
                pool.install(|| self.dispatch(files, reporter))?
            }
            None => self.dispatch(files, reporter)?,
        };
        summary.files_found = files.len();

        reporter.info(&format!("Total changes: {}", summary.total_changes));

        if self.save_requested {
            reporter.info("All changes were saved!");
        }

        if summary.has_failures() {
            reporter.warn(&format!("Failed project files: {}", summary.failures.len()));
            for failure in &summary.failures {
                reporter.warn(&format!("  {}: {}", failure.path.display(), failure.error));
            }
        }

        Ok(summary)
    }

    fn dispatch(&self, files: &[PathBuf], reporter: &dyn Reporter) -> Result<BatchSummary, EditorError> {
        let Some(value) = self.value.as_deref() else {
            // 未设置值：不加载任何文件
            files.par_iter().for_each(|path| {
                reporter.info(&format!("No changes for project file {}", display_name(path)));
            });
            return Ok(BatchSummary::default());
        };

        let total_changes = AtomicUsize::new(0);
        let process = |path: &PathBuf| -> Result<FileReport, EditorError> {
            let report = self.editor.process(path, value, reporter)?;
            total_changes.fetch_add(report.change_count, Ordering::Relaxed);
            Ok(report)
        };

        let (mut reports, failures) = match self.failure_policy {
            FailurePolicy::Abort => {
                let reports = files
                    .par_iter()
                    .map(process)
                    .collect::<Result<Vec<_>, _>>()
                    .inspect_err(|e| tracing::error!("aborting batch: {}", e))?;
                (reports, Vec::new())
            }
            FailurePolicy::Continue => {
                let results: Vec<(&PathBuf, Result<FileReport, EditorError>)> = files
                    .par_iter()
                    .map(|path| (path, process(path)))
                    .collect();

                let mut reports = Vec::new();
                let mut failures = Vec::new();
                for (path, result) in results {
                    match result {
                        Ok(report) => reports.push(report),
                        Err(e) => failures.push(self.record_failure(path, &e, reporter)),
                    }
                }
                (reports, failures)
            }
        };

        reports.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(BatchSummary {
            files_found: files.len(),
            files_processed: reports.len() + failures.len(),
            files_changed: reports.iter().filter(|r| r.change_count > 0).count(),
            total_changes: total_changes.load(Ordering::Relaxed),
            failures,
            files: reports,
        })
    }

    fn record_failure(&self, path: &Path, error: &EditorError, reporter: &dyn Reporter) -> FileFailure {
        tracing::error!(path = %path.display(), "failed to process project file: {}", error);
        reporter.warn(&format!(
            "Failed to process project file {}: {}",
            display_name(path),
            error
        ));
        FileFailure {
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }
}

/// 完整流程：查找文件 → 输出数量 → 并行处理
pub fn run(config: &EditorConfig, reporter: &dyn Reporter) -> Result<BatchSummary, EditorError> {
    let files = find_project_files(&config.root_dir, &config.pattern)?;
    reporter.info(&format!("Found {} project(s)", files.len()));

    BatchRunner::from_config(config).run(&files, reporter)
}
