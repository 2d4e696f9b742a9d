//! Lenjo API - Tokenization orchestration layer
//!
//! Provides unified tokenization interface, including:
//! - Tokenization orchestration over the core reader
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (LenjoError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `tokenize(source, &config)` API.

use tracing::{debug, info};

use lenjo_core::{SourcePosition, TokenReader};

// Re-export config
pub mod config;
pub use config::{config as get_config, get_or_default, init as init_config, is_initialized, RunConfig};

// Re-export config types from lenjo_config
pub use lenjo_config::{Phase, ReaderConfig};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{ErrorReport, LenjoError, ReaderError};
pub use types::TokenizeOutput;

// Re-export core types
pub use lenjo_config;
pub use lenjo_core::{JsonTokenKind, Token, TokenValue};

/// Tokenize with explicit configuration
///
/// This is the recommended API for library users.
pub fn tokenize(source: &str, config: &RunConfig) -> Result<TokenizeOutput, LenjoError> {
    info!(target: "lenjo::reader", "Starting tokenization");

    // 容量不小于源文本长度，整体喂入不会因缓冲区占满而阻塞
    let capacity = config.reader.buffer_capacity.max(source.len() + 1);
    let mut reader = TokenReader::new(capacity);

    reader
        .feed(source.as_bytes())
        .map_err(|e| ReaderError::from_stream_error(e, SourcePosition::start()))?;
    reader
        .terminate()
        .map_err(|e| ReaderError::from_stream_error(e, SourcePosition::start()))?;

    let tokens: Vec<_> = reader.collect();

    debug!(
        target: "lenjo::reader",
        token_count = tokens.len(),
        source_bytes = source.len(),
        "Tokenization completed"
    );

    Ok(TokenizeOutput { tokens })
}

// ==================== Legacy API (using global config) ====================

/// Tokenize source text (uses global config)
///
/// # Panics
/// If global config is not initialized
pub fn tokenize_source(source: &str) -> Result<TokenizeOutput, LenjoError> {
    let config = get_config();
    tokenize(source, config)
}

/// Quick tokenize with default config (auto-initializes if needed)
pub fn quick_tokenize(source: &str) -> Result<TokenizeOutput, LenjoError> {
    tokenize(source, get_or_default())
}
