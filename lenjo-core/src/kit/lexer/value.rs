//! Token 载荷与数字分类
//!
//! 数字分类是一条显式的有序尝试链（先窄后宽），保证优先级可单独审计、
//! 单独测试，与扫描器状态机解耦。

use serde::Serialize;

/// Token 载荷
///
/// 数字按"能无损还原字面量的最窄类型"取值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenValue {
    /// 无载荷（结构符、null）
    None,
    /// 字符串与对象键的文本
    Str(String),
    Int32(i32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
}

impl TokenValue {
    /// 取出文本载荷（字符串/键）
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// 按固定顺序尝试数字表示，返回第一个成功的
///
/// - 含小数点：f32 → f64（f32 仅在对 f64 解析结果无损时胜出）
/// - 不含小数点：i32 → i64 → u64
/// - 全部失败返回 None，调用方回落为字符串
pub fn parse_number(lexeme: &str) -> Option<TokenValue> {
    if lexeme.contains('.') {
        let wide: f64 = lexeme.parse::<f64>().ok().filter(|v| v.is_finite())?;
        if let Ok(narrow) = lexeme.parse::<f32>() {
            if narrow.is_finite() && f64::from(narrow) == wide {
                return Some(TokenValue::Float32(narrow));
            }
        }
        Some(TokenValue::Float64(wide))
    } else if let Ok(v) = lexeme.parse::<i32>() {
        Some(TokenValue::Int32(v))
    } else if let Ok(v) = lexeme.parse::<i64>() {
        Some(TokenValue::Int64(v))
    } else if let Ok(v) = lexeme.parse::<u64>() {
        Some(TokenValue::UInt64(v))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_ladder() {
        assert_eq!(parse_number("42"), Some(TokenValue::Int32(42)));
        assert_eq!(parse_number("-42"), Some(TokenValue::Int32(-42)));
        assert_eq!(parse_number("+42"), Some(TokenValue::Int32(42)));
        // 超出 i32，落到 i64
        assert_eq!(
            parse_number("3000000000"),
            Some(TokenValue::Int64(3000000000))
        );
        // 超出 i64，落到 u64
        assert_eq!(
            parse_number("10000000000000000000"),
            Some(TokenValue::UInt64(10000000000000000000))
        );
        // 超出 u64，整条链失败
        assert_eq!(parse_number("99999999999999999999"), None);
    }

    #[test]
    fn test_float_ladder() {
        assert_eq!(parse_number("42.0"), Some(TokenValue::Float32(42.0)));
        assert_eq!(parse_number(".5"), Some(TokenValue::Float32(0.5)));
        // f32 无法无损还原，落到 f64
        assert_eq!(
            parse_number("3.141592653589793"),
            Some(TokenValue::Float64(3.141592653589793))
        );
        assert_eq!(parse_number("0.1"), Some(TokenValue::Float64(0.1)));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(TokenValue::Str("k".to_string()).as_str(), Some("k"));
        assert_eq!(TokenValue::Int32(1).as_str(), None);
    }
}
