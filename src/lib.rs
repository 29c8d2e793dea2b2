pub mod batch;
pub mod config;
pub mod discovery;
pub mod document;
pub mod editor;
pub mod io;
pub mod report;
pub mod utils;

// 重新导出主要结构
pub use batch::{BatchRunner, BatchSummary, FileFailure};
pub use config::{EditorConfig, FailurePolicy, WritePolicy};
pub use document::ProjectDocument;
pub use editor::{ElementUpdater, FileReport, MutationOutcome, ProjectEditor};
pub use report::{ConsoleReporter, MemoryReporter, Reporter};
pub use utils::EditorError;

// 常量定义
/// 要设置的目标元素
pub const LANG_VERSION_TAG: &str = "LangVersion";
/// 目标元素缺失时的插入锚点
pub const OUTPUT_TYPE_TAG: &str = "OutputType";
/// 默认的项目文件名模式
pub const DEFAULT_PROJECT_PATTERN: &str = "*.csproj";
