//! 字符流层：位置追踪与 UTF-8 解码

pub mod position;
pub mod stream;

pub use position::{SourcePosition, SourceSpan};
pub use stream::{CharStream, StreamError, StreamResult};
