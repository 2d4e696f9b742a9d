//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。宽松文法没有"格式错误"一说，
//! 唯一的错误阶段是字符流读取本身。

use thiserror::Error;

/// 读取器错误（结构化）
pub use lenjo_core::ReaderError;

/// Lenjo 错误类型
#[derive(Error, Debug, Clone)]
pub enum LenjoError {
    /// 字符流/读取器错误（结构化）
    #[error("{0}")]
    Reader(#[from] ReaderError),
}

impl LenjoError {
    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            LenjoError::Reader(e) => Some(e.line()),
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            LenjoError::Reader(e) => Some(e.column()),
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            LenjoError::Reader(_) => "reader",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// 适用于 Web API、工具集成等需要结构化数据的场景。
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        match self {
            LenjoError::Reader(e) => ErrorReport {
                phase: "reader",
                line: Some(e.line()),
                column: Some(e.column()),
                error_kind: format!("{:?}", e.kind),
                message: e.message.clone(),
            },
        }
    }
}

/// 结构化错误报告
///
/// 上层应用（CLI、Web、LSP）可以根据自己的需求格式化。
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// 错误阶段
    pub phase: &'static str,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(
                    f,
                    "[{}:{}] {} error: {}",
                    line, col, self.phase, self.message
                )
            }
            _ => write!(f, "[{}] error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式（工具集成使用）
    ///
    /// 不依赖 serde，手动构建 JSON 字符串。
    pub fn to_json(&self) -> String {
        let line = self
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "null".to_string());
        let col = self
            .column
            .map(|c| c.to_string())
            .unwrap_or_else(|| "null".to_string());

        format!(
            r#"{{"phase":"{}","line":{},"column":{},"error_kind":"{}","message":"{}"}}"#,
            self.phase,
            line,
            col,
            self.error_kind,
            self.message.replace('"', "\\\"")
        )
    }
}
