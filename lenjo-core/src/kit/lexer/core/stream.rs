//! 字符流抽象
//!
//! 将字节流（RingBuffer）转换为Unicode字符流
//! 支持UTF-8解码、位置追踪、单字符预读

use std::sync::Arc;

use super::position::SourcePosition;
use crate::kit::ring_buffer::{RingBuffer, RingBufferError};
use tracing::warn;

/// 字符流错误
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StreamError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] RingBufferError),

    #[error("Stream closed")]
    Closed,
}

/// 流式读取结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamResult<T> {
    /// 成功读取
    Ok(T),
    /// 需要更多输入（流式场景）
    Incomplete,
    /// 流已结束
    Eof,
}

/// 字符流
///
/// 包装RingBuffer，提供字符级 step/peek 操作
pub struct CharStream {
    /// 底层字节缓冲区
    buffer: Arc<RingBuffer>,
    /// 当前位置
    position: SourcePosition,
    /// 缓冲区是否已关闭（EOF）
    is_closed: bool,
}

impl CharStream {
    /// 创建新的字符流
    pub fn new(capacity: usize) -> Self {
        Self::from_buffer(RingBuffer::new(capacity))
    }

    /// 从现有RingBuffer创建（生产者线程持有另一端）
    pub fn from_buffer(buffer: Arc<RingBuffer>) -> Self {
        Self {
            buffer,
            position: SourcePosition::start(),
            is_closed: false,
        }
    }

    /// 当前位置
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// 是否已关闭（EOF）
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// 向流中写入数据（生产者接口）
    pub fn feed(&mut self, data: &[u8]) -> Result<(), StreamError> {
        if self.is_closed {
            warn!(
                target: "lenjo::stream",
                "Attempt to feed {} bytes into closed stream",
                data.len()
            );
            return Err(StreamError::Closed);
        }
        for &byte in data {
            if let Err(e) = self.buffer.push(byte) {
                warn!(target: "lenjo::stream", "Buffer push failed: {}", e);
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// 关闭流（标记EOF）
    pub fn close(&mut self) -> Result<(), StreamError> {
        self.is_closed = true;
        if let Err(e) = self.buffer.close() {
            warn!(target: "lenjo::stream", "Buffer close failed: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    /// 预读第n个字符（不消费）
    ///
    /// # Returns
    /// - `StreamResult::Ok(c)` - 成功读取字符
    /// - `StreamResult::Incomplete` - 缓冲区不足（需要更多输入）
    /// - `StreamResult::Eof` - 已到达EOF
    pub fn try_peek(&self, offset: usize) -> StreamResult<char> {
        // 获取引导字节
        let lead_byte = match self.buffer.try_peek_k(offset) {
            Some(Ok(byte)) => byte,
            Some(Err(RingBufferError::IndexOutOfBounds(_, _))) | None => {
                if self.is_closed {
                    return StreamResult::Eof;
                } else {
                    return StreamResult::Incomplete;
                }
            }
            Some(Err(e)) => {
                warn!(target: "lenjo::stream", "Buffer peek error at offset {}: {}", offset, e);
                return StreamResult::Ok(replacement_char());
            }
        };

        // 计算UTF-8序列长度
        let seq_len = match utf8_sequence_length(lead_byte) {
            Some(len) => len,
            None => {
                warn!(
                    target: "lenjo::stream",
                    "Invalid UTF-8 lead byte: 0x{:02X} at position {:?}",
                    lead_byte,
                    self.position
                );
                return StreamResult::Ok(replacement_char());
            }
        };

        // 检查是否有足够字节
        let required_size = offset + seq_len;
        let current_size = match self.buffer.get_size() {
            Ok(size) => size,
            Err(_) => return StreamResult::Incomplete,
        };

        if required_size > current_size {
            if self.is_closed {
                // 已关闭但序列不完整，返回替换字符
                warn!(
                    target: "lenjo::stream",
                    "Incomplete UTF-8 sequence at EOF: expected {} bytes, got {}",
                    seq_len,
                    current_size - offset
                );
                return StreamResult::Ok(replacement_char());
            } else {
                return StreamResult::Incomplete;
            }
        }

        // 读取完整UTF-8序列并解码
        let mut bytes = [0u8; 4];
        for (i, slot) in bytes.iter_mut().take(seq_len).enumerate() {
            match self.buffer.try_peek_k(offset + i) {
                Some(Ok(byte)) => *slot = byte,
                _ => {
                    warn!(
                        target: "lenjo::stream",
                        "Failed to read UTF-8 byte {} of {}",
                        i,
                        seq_len
                    );
                    return StreamResult::Ok(replacement_char());
                }
            }
        }

        match std::str::from_utf8(&bytes[..seq_len]) {
            Ok(s) => StreamResult::Ok(s.chars().next().unwrap_or(replacement_char())),
            Err(e) => {
                warn!(
                    target: "lenjo::stream",
                    "UTF-8 decode error for bytes {:02X?}: {}",
                    &bytes[..seq_len],
                    e
                );
                StreamResult::Ok(replacement_char())
            }
        }
    }

    /// 读取并消费一个字符
    pub fn try_advance(&mut self) -> StreamResult<char> {
        match self.try_peek(0) {
            StreamResult::Ok(c) => {
                self.position.advance(c);
                // 消费该字符占用的字节
                let len = c.len_utf8();
                for _ in 0..len {
                    let _ = self.buffer.pop();
                }
                StreamResult::Ok(c)
            }
            StreamResult::Incomplete => StreamResult::Incomplete,
            StreamResult::Eof => StreamResult::Eof,
        }
    }

    /// 检查当前字符是否匹配（不消费）
    pub fn check(&self, expected: char) -> bool {
        matches!(self.try_peek(0), StreamResult::Ok(c) if c == expected)
    }
}

/// 获取UTF-8序列长度
fn utf8_sequence_length(lead_byte: u8) -> Option<usize> {
    match lead_byte {
        0x00..=0x7F => Some(1), // ASCII
        0xC0..=0xDF => Some(2), // 2字节序列
        0xE0..=0xEF => Some(3), // 3字节序列
        0xF0..=0xF7 => Some(4), // 4字节序列
        _ => None,              // 非法首字节（续字节或超出范围）
    }
}

/// Unicode替换字符（用于解码失败时的恢复）
fn replacement_char() -> char {
    '\u{FFFD}'
}
