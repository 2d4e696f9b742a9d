//! TokenReader 主入口
//!
//! 把 CharStream 与 JsonScanner 组装成对外的拉取接口：
//! feed/terminate 喂入，next_token 逐个取 token，耗尽后恒返回 None。

use super::core::{CharStream, StreamError};
use super::json::{JsonScanner, JsonTokenKind};
use super::scanner::{ScanResult, Scanner, Token};
use lenjo_config::ReaderConfig;
use tracing::trace;

/// 宽松 JSON token 读取器
pub struct TokenReader {
    scanner: JsonScanner,
    stream: CharStream,
    eof: bool,
}

impl TokenReader {
    /// 创建新的读取器
    pub fn new(capacity: usize) -> Self {
        trace!(target: "lenjo::reader", "Creating new TokenReader with capacity {}", capacity);
        Self {
            scanner: JsonScanner::new(),
            stream: CharStream::new(capacity),
            eof: false,
        }
    }

    /// 按配置创建
    pub fn with_config(config: &ReaderConfig) -> Self {
        Self::new(config.buffer_capacity)
    }

    /// 一次性喂入完整源文本的便捷构造
    pub fn from_source(source: &str) -> Result<Self, StreamError> {
        // 容量含一字节余量，空输入也成立
        let mut reader = Self::new(source.len() + 1);
        reader.feed(source.as_bytes())?;
        reader.terminate()?;
        Ok(reader)
    }

    /// 向读取器输入数据
    pub fn feed(&mut self, data: &[u8]) -> Result<(), StreamError> {
        trace!(target: "lenjo::reader", "Feeding {} bytes", data.len());
        self.stream.feed(data)
    }

    /// 标记输入结束
    pub fn terminate(&mut self) -> Result<(), StreamError> {
        trace!(target: "lenjo::reader", "Terminating input");
        self.eof = true;
        self.stream.close()
    }

    /// 获取下一个 token
    ///
    /// 输入耗尽且无延迟 token 时返回 None，此后每次调用都返回 None
    pub fn next_token(&mut self) -> Option<Token<JsonTokenKind>> {
        match self.scanner.next_token(&mut self.stream) {
            ScanResult::Token(token) => Some(token),
            ScanResult::Incomplete => {
                if self.eof {
                    trace!(target: "lenjo::reader", "Incomplete at EOF, returning None");
                } else {
                    trace!(target: "lenjo::reader", "Incomplete, need more input");
                }
                None
            }
            ScanResult::Eof => {
                trace!(target: "lenjo::reader", "Reached EOF");
                None
            }
        }
    }
}

impl Iterator for TokenReader {
    type Item = Token<JsonTokenKind>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
