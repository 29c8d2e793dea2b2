/// 项目文件编辑器模块
///
/// 处理单个项目文件：加载 → 修改 → 按需写回 → 输出状态行。
/// 遵循"修改-保存分离"原则：修改只发生在内存中的文档上，
/// 只有修改次数大于 0（且写入策略允许）时才写回原路径。

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::config::WritePolicy;
use crate::document::ProjectDocument;
use crate::io::{ProjectReader, ProjectWriter};
use crate::report::Reporter;
use crate::utils::{display_name, EditorError};
use super::mutator::{ElementUpdater, MutationOutcome};

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: MutationOutcome,
    pub change_count: usize,
    /// 是否已写回磁盘
    pub persisted: bool,
}

/// 项目文件编辑器
///
/// # 核心特性
/// - **无状态**: 每次 `process` 独占一个文档，可在多个工作线程间共享
/// - **可注入**: 读写通过 `ProjectReader`/`ProjectWriter`，测试时可替换
///
/// # 使用示例
///
/// ```rust,ignore
/// use msbuild_editor::{ProjectEditor, ConsoleReporter};
/// use msbuild_editor::io::{FsProjectReader, FsProjectWriter};
///
/// let editor = ProjectEditor::new(FsProjectReader, FsProjectWriter);
/// let report = editor.process(Path::new("App.csproj"), "8.0", &ConsoleReporter::default())?;
/// println!("修改了 {} 处", report.change_count);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectEditor<R, W> {
    reader: R,
    writer: W,
    updater: ElementUpdater,
    write_policy: WritePolicy,
    save_requested: bool,
}

impl<R: ProjectReader, W: ProjectWriter> ProjectEditor<R, W> {
    /// 创建编辑器（默认设置 `LangVersion`，总是写回有修改的文件）
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            updater: ElementUpdater::lang_version(),
            write_policy: WritePolicy::Always,
            save_requested: false,
        }
    }

    pub fn with_updater(mut self, updater: ElementUpdater) -> Self {
        self.updater = updater;
        self
    }

    /// 设置写入策略以及是否传入了 `/save`
    pub fn with_write_policy(mut self, policy: WritePolicy, save_requested: bool) -> Self {
        self.write_policy = policy;
        self.save_requested = save_requested;
        self
    }

    pub fn updater(&self) -> &ElementUpdater {
        &self.updater
    }

    /// 加载并解析文档（命名空间在此时解析一次）
    pub fn load(&self, path: &Path) -> Result<ProjectDocument, EditorError> {
        let bytes = self.reader.read(path).map_err(|source| EditorError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = ProjectDocument::parse(&bytes).map_err(|source| EditorError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            namespace = document.namespace().unwrap_or("<none>"),
            "loaded project file"
        );
        Ok(document)
    }

    /// 保存文档到指定路径
    pub fn save(&self, document: &ProjectDocument, path: &Path) -> Result<(), EditorError> {
        let bytes = document.to_bytes().map_err(|e| EditorError::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.writer.write(path, &bytes).map_err(|source| EditorError::Persist {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 处理单个项目文件
    ///
    /// # 参数
    /// * `path` - 项目文件路径
    /// * `value` - 要设置的值
    /// * `reporter` - 状态输出
    ///
    /// # 返回
    /// 返回该文件的处理结果；解析或写入失败时返回携带路径的错误
    pub fn process(
        &self,
        path: &Path,
        value: &str,
        reporter: &dyn Reporter,
    ) -> Result<FileReport, EditorError> {
        let name = display_name(path);
        let mut document = self.load(path)?;

        let outcome = self.updater.apply(&mut document, value);
        let change_count = outcome.change_count();

        if outcome == MutationOutcome::NoTarget {
            reporter.warn(&format!(
                "Could not set {} for project file {}",
                self.updater.target(),
                name
            ));
        }

        let persisted = change_count > 0 && self.write_policy.allows(self.save_requested);
        if persisted {
            self.save(&document, path)?;
        }

        tracing::debug!(path = %path.display(), ?outcome, persisted, "processed project file");

        if change_count > 0 {
            let suffix = if persisted { "" } else { " (not saved)" };
            reporter.info(&format!(
                "Number of changes for project file {}: {}{}",
                name, change_count, suffix
            ));
        } else {
            reporter.info(&format!("No changes for project file {}", name));
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            outcome,
            change_count,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 内存文件系统
    #[derive(Default)]
    struct MemoryFs {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
        writes: Mutex<Vec<PathBuf>>,
    }

    impl MemoryFs {
        fn with_file(path: &str, content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
            fs
        }

        fn content(&self, path: &str) -> String {
            let files = self.files.lock().unwrap();
            String::from_utf8(files[Path::new(path)].clone()).unwrap()
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    impl ProjectReader for MemoryFs {
        fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        }
    }

    impl ProjectWriter for MemoryFs {
        fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
            self.writes.lock().unwrap().push(path.to_path_buf());
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }
    }

    struct ReadOnlyWriter;

    impl ProjectWriter for ReadOnlyWriter {
        fn write(&self, _path: &Path, _bytes: &[u8]) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    const UPDATE_XML: &str =
        "<Project><PropertyGroup><LangVersion>7.3</LangVersion></PropertyGroup></Project>";

    #[test]
    fn test_update_is_persisted() {
        let fs = MemoryFs::with_file("App.csproj", UPDATE_XML);
        let editor = ProjectEditor::new(&fs, &fs);
        let reporter = MemoryReporter::new();

        let report = editor.process(Path::new("App.csproj"), "8.0", &reporter).unwrap();

        assert_eq!(report.change_count, 1);
        assert!(report.persisted);
        assert_eq!(fs.write_count(), 1);
        assert!(fs.content("App.csproj").contains("<LangVersion>8.0</LangVersion>"));
        assert_eq!(
            reporter.messages(),
            vec!["Number of changes for project file App.csproj: 1"]
        );
    }

    #[test]
    fn test_no_target_is_not_persisted() {
        let original = "<Project><PropertyGroup><TargetFramework>net8.0</TargetFramework></PropertyGroup></Project>";
        let fs = MemoryFs::with_file("Lib.csproj", original);
        let editor = ProjectEditor::new(&fs, &fs);
        let reporter = MemoryReporter::new();

        let report = editor.process(Path::new("Lib.csproj"), "8.0", &reporter).unwrap();

        assert_eq!(report.outcome, MutationOutcome::NoTarget);
        assert_eq!(report.change_count, 0);
        assert!(!report.persisted);
        assert_eq!(fs.write_count(), 0);
        assert_eq!(fs.content("Lib.csproj"), original);
        assert_eq!(
            reporter.warnings(),
            vec!["Could not set LangVersion for project file Lib.csproj"]
        );
        assert!(reporter.contains("No changes for project file Lib.csproj"));
    }

    #[test]
    fn test_parse_failure_carries_path() {
        let fs = MemoryFs::with_file("Broken.csproj", "<Project><PropertyGroup></Project>");
        let editor = ProjectEditor::new(&fs, &fs);

        let err = editor
            .process(Path::new("Broken.csproj"), "8.0", &MemoryReporter::new())
            .unwrap_err();

        assert!(matches!(err, EditorError::Parse { .. }));
        assert_eq!(err.path(), Some(Path::new("Broken.csproj")));
    }

    #[test]
    fn test_persist_failure() {
        let fs = MemoryFs::with_file("App.csproj", UPDATE_XML);
        let editor = ProjectEditor::new(&fs, ReadOnlyWriter);

        let err = editor
            .process(Path::new("App.csproj"), "8.0", &MemoryReporter::new())
            .unwrap_err();

        assert!(matches!(err, EditorError::Persist { .. }));
    }

    #[test]
    fn test_strict_policy_without_save_flag_skips_write() {
        let fs = MemoryFs::with_file("App.csproj", UPDATE_XML);
        let editor = ProjectEditor::new(&fs, &fs).with_write_policy(WritePolicy::RequireSaveFlag, false);
        let reporter = MemoryReporter::new();

        let report = editor.process(Path::new("App.csproj"), "8.0", &reporter).unwrap();

        assert_eq!(report.change_count, 1);
        assert!(!report.persisted);
        assert_eq!(fs.write_count(), 0);
        assert!(reporter.contains("(not saved)"));
    }

    #[test]
    fn test_strict_policy_with_save_flag_writes() {
        let fs = MemoryFs::with_file("App.csproj", UPDATE_XML);
        let editor = ProjectEditor::new(&fs, &fs).with_write_policy(WritePolicy::RequireSaveFlag, true);

        let report = editor
            .process(Path::new("App.csproj"), "8.0", &MemoryReporter::new())
            .unwrap();

        assert!(report.persisted);
        assert_eq!(fs.write_count(), 1);
    }
}
