/// 项目文件 IO 实现
///
/// 提供基于文件系统的默认读写实现
use std::path::Path;
use super::traits::{ProjectReader, ProjectWriter};

/// 默认的项目文件读取器（基于 std::fs）
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProjectReader;

impl ProjectReader for FsProjectReader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// 默认的项目文件写入器（基于 std::fs）
///
/// 原地覆盖，不创建备份
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProjectWriter;

impl ProjectWriter for FsProjectWriter {
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)
    }
}
