//! 测试辅助工具
//!
//! 提供端到端 token 流测试的辅助函数

use lenjo_core::{JsonTokenKind, Token, TokenReader, TokenValue};

/// 读取完整 token 序列
pub fn read_tokens(input: &str) -> Vec<Token<JsonTokenKind>> {
    let mut reader = TokenReader::new(input.len() + 64);
    reader.feed(input.as_bytes()).expect("feed failed");
    reader.terminate().expect("terminate failed");
    reader.collect()
}

/// 提取 token 种类序列
pub fn kinds(tokens: &[Token<JsonTokenKind>]) -> Vec<JsonTokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

/// 提取（种类, 载荷）序列，忽略 span
pub fn kinds_and_values(tokens: &[Token<JsonTokenKind>]) -> Vec<(JsonTokenKind, TokenValue)> {
    tokens.iter().map(|t| (t.kind, t.value.clone())).collect()
}

/// 把 token 序列渲染回严格 JSON 文本（仅用于回环测试）
pub fn render(tokens: &[Token<JsonTokenKind>]) -> String {
    let mut out = String::new();
    let mut need_sep = false;

    for token in tokens {
        match token.kind {
            JsonTokenKind::ObjectStart => {
                push_sep(&mut out, &mut need_sep);
                out.push('{');
            }
            JsonTokenKind::ArrayStart => {
                push_sep(&mut out, &mut need_sep);
                out.push('[');
            }
            JsonTokenKind::ObjectEnd => {
                out.push('}');
                need_sep = true;
            }
            JsonTokenKind::ArrayEnd => {
                out.push(']');
                need_sep = true;
            }
            JsonTokenKind::ObjectKey => {
                push_sep(&mut out, &mut need_sep);
                out.push('"');
                out.push_str(token.value.as_str().expect("key without text"));
                out.push_str("\":");
            }
            JsonTokenKind::String => {
                push_sep(&mut out, &mut need_sep);
                out.push('"');
                out.push_str(token.value.as_str().expect("string without text"));
                out.push('"');
                need_sep = true;
            }
            JsonTokenKind::Number => {
                push_sep(&mut out, &mut need_sep);
                match &token.value {
                    TokenValue::Int32(v) => out.push_str(&v.to_string()),
                    TokenValue::Int64(v) => out.push_str(&v.to_string()),
                    TokenValue::UInt64(v) => out.push_str(&v.to_string()),
                    // {:?} 保证浮点文本带小数点，回环后仍是浮点
                    TokenValue::Float32(v) => out.push_str(&format!("{:?}", v)),
                    TokenValue::Float64(v) => out.push_str(&format!("{:?}", v)),
                    other => panic!("number token with payload {:?}", other),
                }
                need_sep = true;
            }
            JsonTokenKind::Boolean => {
                push_sep(&mut out, &mut need_sep);
                match token.value {
                    TokenValue::Bool(true) => out.push_str("true"),
                    TokenValue::Bool(false) => out.push_str("false"),
                    ref other => panic!("boolean token with payload {:?}", other),
                }
                need_sep = true;
            }
            JsonTokenKind::Null => {
                push_sep(&mut out, &mut need_sep);
                out.push_str("null");
                need_sep = true;
            }
        }
    }

    out
}

fn push_sep(out: &mut String, need_sep: &mut bool) {
    if *need_sep {
        out.push(',');
    }
    *need_sep = false;
}
