//! API 输出类型

use lenjo_core::{JsonTokenKind, Token};

/// Tokenization output
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeOutput {
    /// The full token sequence, in reading order
    pub tokens: Vec<Token<JsonTokenKind>>,
}

impl TokenizeOutput {
    /// Number of tokens produced
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the input produced no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
