use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use msbuild_editor::config::{normalize_args, USAGE};
use msbuild_editor::{batch, ConsoleReporter, EditorConfig, FailurePolicy, WritePolicy};

#[derive(Parser)]
#[command(name = "msbuild-editor")]
#[command(about = "批量设置 MSBuild 项目文件中的 LangVersion")]
#[command(version)]
struct Cli {
    /// 项目文件所在的根目录（递归查找）
    #[arg(long)]
    rootdir: Option<String>,

    /// 要设置的 LangVersion 值（为空时不修改任何文件）
    #[arg(long)]
    langversion: Option<String>,

    /// 结束时输出保存确认行
    #[arg(long)]
    save: bool,

    /// 只有指定 --save 时才写回文件
    #[arg(long)]
    strict_save: bool,

    /// 遇到第一个失败文件即终止
    #[arg(long)]
    fail_fast: bool,

    /// 工作线程数（默认由 rayon 决定）
    #[arg(long)]
    jobs: Option<usize>,

    /// 项目文件名模式
    #[arg(long)]
    pattern: Option<String>,

    /// 以 JSON 输出汇总
    #[arg(long)]
    json: bool,

    /// 静默模式（不输出逐文件状态）
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    /// 构建配置；缺少根目录时返回 None
    fn to_config(&self) -> Option<EditorConfig> {
        let root_dir = self.rootdir.as_deref().map(str::trim).filter(|dir| !dir.is_empty())?;

        let write_policy = if self.strict_save {
            WritePolicy::RequireSaveFlag
        } else {
            WritePolicy::Always
        };
        let failure_policy = if self.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        };

        let mut config = EditorConfig::new(root_dir)
            .with_lang_version(self.langversion.clone())
            .with_save(self.save)
            .with_write_policy(write_policy)
            .with_failure_policy(failure_policy)
            .with_jobs(self.jobs)
            .with_json(self.json);
        if let Some(pattern) = &self.pattern {
            config = config.with_pattern(pattern.clone());
        }
        Some(config)
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 诊断日志写到标准错误，级别由 MSBUILD_EDITOR_LOG 控制（默认 warn）
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MSBUILD_EDITOR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let Some(config) = cli.to_config() else {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };

    let reporter = ConsoleReporter {
        quiet: cli.quiet || config.json,
    };

    let summary = batch::run(&config, &reporter)
        .with_context(|| format!("处理项目文件失败: {}", config.root_dir.display()))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
