//! 读取器错误类型
//!
//! 宽松文法本身不产生词法错误（一切输入都归结为某个 token 序列），
//! 唯一的真实故障来自底层字符流；此处提供带位置的结构化包装。

use super::core::{SourcePosition, StreamError};

/// 读取器错误，包含结构化信息
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderError {
    /// 错误类型
    pub kind: ErrorKind,
    /// 错误发生的位置
    pub position: SourcePosition,
    /// 详细错误消息
    pub message: String,
}

/// 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// 向已关闭的流写入
    StreamClosed,
    /// 底层缓冲区故障
    Buffer,
}

impl ReaderError {
    /// 从字符流错误转换，附带读取位置
    pub fn from_stream_error(error: StreamError, position: SourcePosition) -> Self {
        let kind = match &error {
            StreamError::Closed => ErrorKind::StreamClosed,
            StreamError::Buffer(_) => ErrorKind::Buffer,
        };
        Self {
            kind,
            position,
            message: error.to_string(),
        }
    }

    /// 错误行号（1-based）
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 错误列号（1-based）
    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.message, self.position.line, self.position.column
        )
    }
}

impl std::error::Error for ReaderError {}
