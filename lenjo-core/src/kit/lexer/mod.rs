//! 流式宽松 JSON 词法读取器
//!
//! 设计目标：
//! - 单遍：逐 token 拉取，不构建解析树
//! - 宽松：容忍裸标量、可省略的冒号/逗号、缺失值补 null
//! - 流式：feed/terminate 增量喂入，原生支持生产者线程
//! - 精准定位：每个 token 携带行列/字节偏移 span

pub mod core;
pub mod error;
pub mod json;
pub mod reader;
pub mod scanner;
pub mod value;

pub use self::core::{CharStream, SourcePosition, SourceSpan, StreamError, StreamResult};
pub use error::{ErrorKind, ReaderError};
pub use json::{JsonScanner, JsonTokenKind};
pub use reader::TokenReader;
pub use scanner::{ScanResult, Scanner, Token};
pub use value::TokenValue;
