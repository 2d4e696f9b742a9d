//! Scanner trait 定义
//!
//! 扫描器与字符流解耦：Scanner 驱动 CharStream 组装词素并产出 token，
//! 不同文法实现各自的 Scanner。

use super::core::{SourcePosition, SourceSpan};
use super::value::TokenValue;
use serde::Serialize;

/// 词法扫描器 trait
pub trait Scanner {
    /// Token 种类
    type TokenKind: Clone + PartialEq + std::fmt::Debug;

    /// 创建新扫描器
    fn new() -> Self;

    /// 扫描下一个 token
    ///
    /// 这是核心方法，驱动字符流并生成 token
    fn next_token(&mut self, stream: &mut super::CharStream) -> ScanResult<Token<Self::TokenKind>>;
}

/// Token 结构
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token<K> {
    pub kind: K,
    pub span: SourceSpan,
    /// 载荷值；结构符与 null 为 `TokenValue::None`
    pub value: TokenValue,
}

impl<K> Token<K> {
    /// 创建无载荷 token
    pub fn new(kind: K, span: SourceSpan) -> Self {
        Self {
            kind,
            span,
            value: TokenValue::None,
        }
    }

    /// 创建带载荷 token
    pub fn with_value(kind: K, span: SourceSpan, value: TokenValue) -> Self {
        Self { kind, span, value }
    }

    /// token 的起始位置
    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    /// token 的结束位置
    pub fn end(&self) -> SourcePosition {
        self.span.end
    }
}

/// 扫描结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanResult<T> {
    /// 成功扫描到 token
    Token(T),
    /// 需要更多输入（流式场景）
    Incomplete,
    /// 流已结束
    Eof,
}
