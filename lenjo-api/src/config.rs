//! API 层配置
//!
//! 包含运行配置 RunConfig 和全局单例（供 CLI 使用）

use lenjo_config::ReaderConfig;
use once_cell::sync::OnceCell;

/// Tokenization run configuration
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Whether to echo the source text before tokenizing
    pub show_source: bool,
    /// Whether to dump the token stream as JSON
    pub dump_tokens: bool,
    /// Character stream configuration
    pub reader: ReaderConfig,
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (must be called once before any operation)
///
/// # Panics
/// If config is already initialized
pub fn init(config: RunConfig) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// Get global config reference
///
/// # Panics
/// If config is not initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// Get global config, initializing with defaults if unset
pub fn get_or_default() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}
