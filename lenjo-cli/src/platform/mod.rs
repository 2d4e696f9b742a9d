//! 平台相关的输出格式化

mod cli;

pub use cli::{print_error_with_source, print_tokens};
