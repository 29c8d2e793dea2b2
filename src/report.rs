/// 状态输出接口
///
/// 编辑与批处理逻辑不直接打印，而是把人类可读的状态行交给 `Reporter`。
/// 控制台实现写到标准输出；测试中使用 `MemoryReporter` 收集输出。

use std::sync::Mutex;

/// 状态行级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warn,
}

/// 状态输出 trait（在工作线程间共享）
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// 控制台输出（标准输出）
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    /// 静默模式：不输出信息行，警告改写到标准错误
    pub quiet: bool,
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn warn(&self, message: &str) {
        if self.quiet {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

/// 内存输出（测试用）
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(ReportLevel, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有已记录的行（按记录顺序）
    pub fn lines(&self) -> Vec<(ReportLevel, String)> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// 仅返回消息文本
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, message)| message).collect()
    }

    /// 仅返回警告
    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(level, _)| *level == ReportLevel::Warn)
            .map(|(_, message)| message)
            .collect()
    }

    /// 是否存在包含指定文本的行
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, message)| message.contains(needle))
    }

    fn push(&self, level: ReportLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.push(ReportLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(ReportLevel::Warn, message);
    }
}
