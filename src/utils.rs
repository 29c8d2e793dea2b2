use thiserror::Error;
use std::path::PathBuf;

/// 自定义错误类型
///
/// 所有单文件错误都携带文件路径，便于定位出错的输入
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: xmltree::ParseError,
    },

    #[error("Failed to serialize {}: {}", path.display(), message)]
    Serialize { path: PathBuf, message: String },

    #[error("Failed to write {}: {}", path.display(), source)]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EditorError {
    /// 出错文件的路径（与单个文件无关的错误返回 None）
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            EditorError::Read { path, .. }
            | EditorError::Parse { path, .. }
            | EditorError::Serialize { path, .. }
            | EditorError::Persist { path, .. } => Some(path.as_path()),
            EditorError::RootNotFound(path) => Some(path.as_path()),
            EditorError::WorkerPool(_) | EditorError::IoError(_) => None,
        }
    }
}

/// 通配符匹配（支持 `*` 与 `?`，ASCII 大小写不敏感）
///
/// 用于按项目文件模式（如 `*.csproj`）筛选文件名
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut n, mut p) = (0usize, 0usize);
    // 最近一次 `*` 的位置，以及它当时对应的 name 位置
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            n += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            // 回溯：让 `*` 多吞一个字符
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// 取路径中的文件名，用于状态输出
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
