//! Lenjo Core - Relaxed JSON token reader (pure logic, no IO)
//!
//! Contains the byte ring buffer, the UTF-8 character stream, and the
//! pull-style token reader. Only operates on in-memory data structures,
//! no file IO or terminal output.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod kit;

// Re-export common types
pub use kit::lexer::{
    CharStream, JsonScanner, JsonTokenKind, ReaderError, ScanResult, Scanner, SourcePosition,
    SourceSpan, StreamError, StreamResult, Token, TokenReader, TokenValue,
};

// Re-export config types from lenjo-config
pub use lenjo_config::{Phase, ReaderConfig};
