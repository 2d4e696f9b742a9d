//! Lenjo Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Lenjo crates.

use serde::Deserialize;

/// Configuration for the character stream feeding the token reader
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Capacity of the byte ring buffer behind the character stream
    pub buffer_capacity: usize,
}

/// Processing phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Stream,
    Reader,
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Stream => "stream",
            Phase::Reader => "reader",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("lenjo::{}", self.as_str())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reader_config() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.buffer_capacity, 4096);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Stream.as_str(), "stream");
        assert_eq!(Phase::Reader.target(), "lenjo::reader");
    }

    #[test]
    fn test_reader_config_deserialize() {
        let cfg: ReaderConfig = serde_json::from_str(r#"{"buffer_capacity": 128}"#).unwrap();
        assert_eq!(cfg.buffer_capacity, 128);

        // 缺省字段回落到默认值
        let cfg: ReaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.buffer_capacity, 4096);
    }
}
