/// IO 抽象层 - trait 定义
///
/// 批处理会在多个工作线程中共享同一个读写器，因此要求 `Send + Sync`。

use std::path::Path;

/// 项目文件读取 trait
///
/// # 职责
/// - 读取项目文件的原始字节
/// - 不负责解析，仅负责 IO
pub trait ProjectReader: Send + Sync {
    /// 读取项目文件
    ///
    /// # 参数
    /// * `path` - 文件路径
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// 项目文件写入 trait
///
/// # 职责
/// - 将序列化后的文档写回原路径
/// - 不负责序列化，仅负责 IO
pub trait ProjectWriter: Send + Sync {
    /// 写入项目文件
    ///
    /// # 参数
    /// * `path` - 目标文件路径
    /// * `bytes` - 序列化后的文档
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

impl<T: ProjectReader + ?Sized> ProjectReader for &T {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

impl<T: ProjectWriter + ?Sized> ProjectWriter for &T {
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        (**self).write(path, bytes)
    }
}
