//! CLI 格式化输出
//!
//! 提供命令行友好的 token 流显示、错误显示和源码上下文打印。

use lenjo_api::{JsonTokenKind, LenjoError, Token, TokenValue};

/// 逐行打印 token 流（位置 + 种类 + 载荷）
pub fn print_tokens(tokens: &[Token<JsonTokenKind>]) {
    for token in tokens {
        let pos = format!("{}:{}", token.span.start.line, token.span.start.column);
        match &token.value {
            TokenValue::None => println!("{:>8}  {:?}", pos, token.kind),
            value => println!("{:>8}  {:?}  {}", pos, token.kind, format_value(value)),
        }
    }
}

/// 载荷的单行文本表示
fn format_value(value: &TokenValue) -> String {
    match value {
        TokenValue::None => String::new(),
        TokenValue::Str(s) => format!("{:?}", s),
        TokenValue::Int32(v) => format!("{} (i32)", v),
        TokenValue::Int64(v) => format!("{} (i64)", v),
        TokenValue::UInt64(v) => format!("{} (u64)", v),
        TokenValue::Float32(v) => format!("{:?} (f32)", v),
        TokenValue::Float64(v) => format!("{:?} (f64)", v),
        TokenValue::Bool(v) => v.to_string(),
    }
}

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &LenjoError, source: &str) {
    eprintln!("❌ {}", e);

    if let (Some(error_line), Some(col)) = (e.line(), e.column()) {
        print_source_context(source, error_line, col);
    }
}

/// 打印源代码上下文（显示错误行前后几行）
pub fn print_source_context(source: &str, error_line: usize, error_col: usize) {
    const CONTEXT_LINES: usize = 5; // 错误行前后显示的上下文行数

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return;
    }

    // 计算要显示的行范围
    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // 行号最大宽度，用于对齐
    let max_line_num_width = end_line.to_string().len();

    let separator = "-".repeat(max_line_num_width + 1);
    eprintln!("{}|--", separator);

    for line_idx in start_line..=end_line {
        let line_content = lines[line_idx - 1];
        let line_str = line_idx.to_string();
        let padding = " ".repeat(max_line_num_width.saturating_sub(line_str.len()));

        if line_idx == error_line {
            eprintln!("{}{} | {}", padding, line_str, line_content);

            // 指向错误位置的标记
            let marker = " ".repeat(error_col.saturating_sub(1));
            eprintln!("{} | {}^", " ".repeat(max_line_num_width), marker);
        } else {
            eprintln!("{}{} | {}", padding, line_str, line_content);
        }
    }

    eprintln!("{}|--", separator);
}
