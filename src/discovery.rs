/// 项目文件查找
///
/// 在根目录下递归查找文件名匹配模式的项目文件

use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::{matches_pattern, EditorError};

/// 递归查找项目文件，结果按路径排序
///
/// # 参数
/// * `root` - 搜索根目录
/// * `pattern` - 文件名模式（如 `*.csproj`）
pub fn find_project_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, EditorError> {
    if !root.is_dir() {
        return Err(EditorError::RootNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    collect(root, pattern, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, pattern: &str, files: &mut Vec<PathBuf>) -> Result<(), EditorError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        if file_type.is_dir() {
            collect(&path, pattern, files)?;
        } else if file_type.is_file() && matches_pattern(&entry.file_name().to_string_lossy(), pattern) {
            files.push(path);
        }
    }
    Ok(())
}
