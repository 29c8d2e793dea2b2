/// IO 抽象层模块
///
/// 该模块提供了项目文件读写的抽象接口，遵循依赖倒置原则。
/// 编辑逻辑只依赖 trait，测试中可替换为内存实现或计数实现。
///
/// # 架构设计
///
/// - **traits**: 定义 ProjectReader/ProjectWriter trait 接口
/// - **project_io**: 基于文件系统的默认实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use msbuild_editor::io::{FsProjectReader, ProjectReader};
///
/// let reader = FsProjectReader;
/// let bytes = reader.read(Path::new("App.csproj"))?;
/// ```
pub mod traits;
pub mod project_io;

// === 导出 trait 定义 ===
pub use traits::{ProjectReader, ProjectWriter};

// === 导出默认实现 ===
pub use project_io::{FsProjectReader, FsProjectWriter};
