//! CLI 配置
//!
//! 包含 CLI 特有的配置：日志配置（按阶段目标细分）

use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub stream: Option<Level>,
    pub reader: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            stream: None,
            reader: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "lenjo::stream" => self.stream.unwrap_or(self.global),
            "lenjo::reader" => self.reader.unwrap_or(self.global),
            _ => self.global,
        }
    }
}
