/// 编辑器层模块
///
/// 该模块提供单个项目文件的修改能力。
/// 遵循"修改-保存分离"原则：修改只作用于内存中的文档，由编辑器决定是否写回。
///
/// # 架构设计
///
/// - **mutator**: 文档修改策略（找到则全部更新，否则在第一个锚点后插入）
/// - **project_editor**: 单文件处理流程（加载、修改、按需写回、输出状态）
///
/// # 使用示例
///
/// ```rust,ignore
/// use msbuild_editor::{ElementUpdater, ProjectDocument};
///
/// let mut document = ProjectDocument::parse(bytes)?;
/// let outcome = ElementUpdater::lang_version().apply(&mut document, "8.0");
/// println!("修改了 {} 处", outcome.change_count());
/// ```
pub mod mutator;
pub mod project_editor;

// === 导出公共接口 ===
pub use mutator::{ElementUpdater, MutationOutcome};
pub use project_editor::{FileReport, ProjectEditor};
