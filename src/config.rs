/// 运行配置
///
/// 命令行解析的结果汇总为一个不可变的 `EditorConfig`，在分派任何文件之前完成校验。
/// 同时兼容旧式参数写法（`/rootdir <dir> /langversion <ver> /save`）：
/// `normalize_args` 将其改写为 `--flag=value` 形式后再交给 clap。

use std::ffi::OsString;
use std::path::PathBuf;
use serde::Serialize;
use crate::DEFAULT_PROJECT_PATTERN;

/// 用法说明（缺少根目录时输出）
pub const USAGE: &str =
    "Usage: msbuild-editor /rootdir <dir containing project files> [/langversion <version string>] [/save]";

/// 写入策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// 有修改就写回，`/save` 只影响最后的确认行
    #[default]
    Always,
    /// 只有传入 `/save` 时才写回
    RequireSaveFlag,
}

impl WritePolicy {
    pub fn allows(&self, save_requested: bool) -> bool {
        match self {
            WritePolicy::Always => true,
            WritePolicy::RequireSaveFlag => save_requested,
        }
    }
}

/// 单文件失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// 跳过失败文件，继续处理其余文件，结束后汇总报告
    #[default]
    Continue,
    /// 第一个失败即终止整个批处理
    Abort,
}

/// 批处理配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub root_dir: PathBuf,
    /// 要设置的值；None 表示不修改任何文件
    pub lang_version: Option<String>,
    /// 是否传入了 `/save`
    pub save: bool,
    pub write_policy: WritePolicy,
    pub failure_policy: FailurePolicy,
    /// 工作线程数；None 使用 rayon 全局线程池
    pub jobs: Option<usize>,
    /// 项目文件名模式
    pub pattern: String,
    /// 以 JSON 输出汇总
    pub json: bool,
}

impl EditorConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            lang_version: None,
            save: false,
            write_policy: WritePolicy::Always,
            failure_policy: FailurePolicy::Continue,
            jobs: None,
            pattern: DEFAULT_PROJECT_PATTERN.to_string(),
            json: false,
        }
    }

    /// 空白值视为未设置
    pub fn with_lang_version(mut self, value: Option<String>) -> Self {
        self.lang_version = value.filter(|v| !v.trim().is_empty());
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// 0 视为未设置
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !pattern.trim().is_empty() {
            self.pattern = pattern;
        }
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// 要设置的值（已去除空白值）
    pub fn target_value(&self) -> Option<&str> {
        self.lang_version.as_deref()
    }
}

/// 需要取值的参数
const VALUE_FLAGS: &[&str] = &["rootdir", "langversion", "pattern", "jobs"];
/// 缺少值时以空字符串代替的参数（其余缺值参数直接忽略）
const EMPTY_WHEN_MISSING: &[&str] = &["rootdir", "langversion"];
/// 开关参数
const SWITCH_FLAGS: &[&str] = &["save", "strict-save", "fail-fast", "json", "quiet"];
/// 原样交给 clap 的参数
const PASSTHROUGH: &[&str] = &["-h", "--help", "-V", "--version"];

/// 将参数规范化为 clap 能识别的形式
///
/// - `/flag` 与 `--flag` 均可，大小写不敏感，前后空白会被去除
/// - 取值参数使用紧随其后的一个参数作为值（即使它看起来像参数）
/// - `/rootdir`、`/langversion` 位于末尾时值为空字符串
/// - 空白参数与未知参数被忽略
///
/// 第一个元素（程序名）原样保留。
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let rest: Vec<String> = args.map(|arg| arg.to_string_lossy().into_owned()).collect();

    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].trim();
        i += 1;

        if arg.is_empty() {
            continue;
        }

        if PASSTHROUGH.contains(&arg) {
            normalized.push(arg.into());
            continue;
        }

        let Some(flag) = strip_flag_prefix(arg) else {
            tracing::debug!(argument = arg, "ignoring unrecognized argument");
            continue;
        };

        // --flag=value 形式
        if let Some((name, value)) = flag.split_once('=') {
            let name = name.to_ascii_lowercase();
            if VALUE_FLAGS.contains(&name.as_str()) {
                normalized.push(format!("--{}={}", name, value).into());
            } else {
                tracing::debug!(argument = arg, "ignoring unrecognized argument");
            }
            continue;
        }

        let name = flag.to_ascii_lowercase();
        if VALUE_FLAGS.contains(&name.as_str()) {
            match rest.get(i) {
                Some(value) => {
                    normalized.push(format!("--{}={}", name, value).into());
                    i += 1;
                }
                None if EMPTY_WHEN_MISSING.contains(&name.as_str()) => {
                    normalized.push(format!("--{}=", name).into());
                }
                None => {}
            }
        } else if SWITCH_FLAGS.contains(&name.as_str()) {
            normalized.push(format!("--{}", name).into());
        } else {
            tracing::debug!(argument = arg, "ignoring unrecognized argument");
        }
    }

    normalized
}

fn strip_flag_prefix(arg: &str) -> Option<&str> {
    arg.strip_prefix("--")
        .or_else(|| arg.strip_prefix('/'))
        .filter(|flag| !flag.is_empty())
}
