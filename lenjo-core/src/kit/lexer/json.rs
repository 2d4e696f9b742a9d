//! 宽松 JSON 的 Scanner 实现
//!
//! 与严格 JSON 的区别：
//! - 冒号/逗号只是分隔符，可省略、可重复，不产出 token
//! - 未加引号的裸标量按 null/布尔/数字/字符串分类
//! - 键后紧跟收束符或另一个键时，为缺失的值补发 null
//!
//! 补发通过单槽延迟缓冲实现：本次调用吐出 null，被顶替的 token 存入
//! 延迟槽，下次调用原样吐出，不需要 token 队列。

use super::core::{CharStream, SourcePosition, SourceSpan, StreamResult};
use super::scanner::{ScanResult, Scanner, Token};
use super::value::{parse_number, TokenValue};
use serde::Serialize;
use tracing::{debug, trace};

/// 宽松 JSON 的 token 种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JsonTokenKind {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    ObjectKey,
    String,
    Number,
    Boolean,
    Null,
}

/// 裸词素的保留终止字符
///
/// `#` 仅作终止符，不跳过注释行；空格不终止，允许标量含空格
fn is_bare_terminator(c: char) -> bool {
    matches!(
        c,
        '\r' | '\n' | ',' | ':' | '{' | '}' | '[' | ']' | '#'
    )
}

/// 分隔符：自身不产出 token，与空白一同跳过
fn is_separator(c: char) -> bool {
    c == ':' || c == ','
}

/// 宽松 JSON 扫描器
pub struct JsonScanner {
    /// 当前 token 的起始位置（用于构建 span）
    token_start: SourcePosition,
    /// 上一次调用实际产出的 token 种类（补 null 判定依据）
    last: Option<JsonTokenKind>,
    /// 单槽延迟 token：Some 即已装填，下次调用优先吐出
    pending: Option<Token<JsonTokenKind>>,
    /// 跨调用复用的词素缓冲，每个词素开始前清空
    lexeme: String,
}

impl Scanner for JsonScanner {
    type TokenKind = JsonTokenKind;

    fn new() -> Self {
        trace!(target: "lenjo::reader", "Creating new JsonScanner");
        Self {
            token_start: SourcePosition::start(),
            last: None,
            pending: None,
            lexeme: String::new(),
        }
    }

    fn next_token(&mut self, stream: &mut CharStream) -> ScanResult<Token<JsonTokenKind>> {
        // 延迟槽已装填：原样吐出，跳过一切扫描
        if let Some(token) = self.pending.take() {
            trace!(target: "lenjo::reader", kind = ?token.kind, "Emitting deferred token");
            return self.emit(token);
        }

        // 跳过空白与分隔符，找到有效字符
        loop {
            match stream.try_peek(0) {
                StreamResult::Ok(c) if c.is_whitespace() || is_separator(c) => {
                    let _ = stream.try_advance();
                }
                StreamResult::Ok(_) => break,
                StreamResult::Incomplete => return ScanResult::Incomplete,
                StreamResult::Eof => return ScanResult::Eof,
            }
        }

        self.token_start = stream.position();

        let c = match stream.try_advance() {
            StreamResult::Ok(c) => c,
            StreamResult::Incomplete => return ScanResult::Incomplete,
            StreamResult::Eof => return ScanResult::Eof,
        };

        match c {
            '{' => {
                let span = SourceSpan::range(self.token_start, stream.position());
                self.emit(Token::new(JsonTokenKind::ObjectStart, span))
            }
            '[' => {
                let span = SourceSpan::range(self.token_start, stream.position());
                self.emit(Token::new(JsonTokenKind::ArrayStart, span))
            }
            '}' => self.close_container(stream, JsonTokenKind::ObjectEnd),
            ']' => self.close_container(stream, JsonTokenKind::ArrayEnd),
            '"' => self.scan_quoted(stream),
            _ => self.scan_bare(stream, c),
        }
    }
}

impl JsonScanner {
    /// 产出 token 并记录其种类
    ///
    /// 补发的 null 也经由此处，保证连续缺值的键逐个补 null 而不是合并
    fn emit(&mut self, token: Token<JsonTokenKind>) -> ScanResult<Token<JsonTokenKind>> {
        self.last = Some(token.kind);
        debug!(
            target: "lenjo::reader",
            kind = ?token.kind,
            line = token.span.start.line,
            column = token.span.start.column,
            "Produced token"
        );
        ScanResult::Token(token)
    }

    /// 处理 `}` / `]`
    ///
    /// 上一个 token 是键时，该键没有值：本次补发 null，收束符延迟一拍
    fn close_container(
        &mut self,
        stream: &CharStream,
        kind: JsonTokenKind,
    ) -> ScanResult<Token<JsonTokenKind>> {
        let span = SourceSpan::range(self.token_start, stream.position());
        let closer = Token::new(kind, span);

        if self.last == Some(JsonTokenKind::ObjectKey) {
            trace!(target: "lenjo::reader", closer = ?kind, "Key with no value, deferring closer");
            self.pending = Some(closer);
            return self.emit(Token::new(
                JsonTokenKind::Null,
                SourceSpan::at(self.token_start),
            ));
        }

        self.emit(closer)
    }

    /// 扫描引号字符串
    ///
    /// 积累到未转义的 `"` 为止；转义判定只看前一个已积累字符是否为 `\`，
    /// 反斜杠原样保留（不做转义解码）。输入耗尽时按截断词素继续分类。
    fn scan_quoted(&mut self, stream: &mut CharStream) -> ScanResult<Token<JsonTokenKind>> {
        self.lexeme.clear();

        loop {
            match stream.try_advance() {
                StreamResult::Ok('"') if !self.lexeme.ends_with('\\') => break,
                StreamResult::Ok(c) => self.lexeme.push(c),
                StreamResult::Incomplete => return ScanResult::Incomplete,
                StreamResult::Eof => {
                    trace!(target: "lenjo::reader", "Unterminated string at EOF, keeping partial lexeme");
                    break;
                }
            }
        }

        self.finish_lexeme(stream, true)
    }

    /// 扫描裸词素
    ///
    /// 以 `first` 开头，一直吞到保留终止符或输入耗尽
    fn scan_bare(
        &mut self,
        stream: &mut CharStream,
        first: char,
    ) -> ScanResult<Token<JsonTokenKind>> {
        self.lexeme.clear();
        self.lexeme.push(first);

        loop {
            match stream.try_peek(0) {
                StreamResult::Ok(c) if is_bare_terminator(c) => break,
                StreamResult::Ok(c) => {
                    self.lexeme.push(c);
                    let _ = stream.try_advance();
                }
                StreamResult::Incomplete => return ScanResult::Incomplete,
                StreamResult::Eof => break,
            }
        }

        self.finish_lexeme(stream, false)
    }

    /// 词素收尾：键/值判定与分类
    ///
    /// 向后越过空白窥视下一个有效字符，是 `:` 则本词素是键而非值。
    /// 被窥视的 `:` 留在流中，由下次调用当作分隔符跳过。
    fn finish_lexeme(
        &mut self,
        stream: &mut CharStream,
        quoted: bool,
    ) -> ScanResult<Token<JsonTokenKind>> {
        let span = SourceSpan::range(self.token_start, stream.position());

        let is_key = loop {
            match stream.try_peek(0) {
                StreamResult::Ok(c) if c.is_whitespace() => {
                    let _ = stream.try_advance();
                }
                StreamResult::Ok(c) => break c == ':',
                StreamResult::Incomplete => return ScanResult::Incomplete,
                StreamResult::Eof => break false,
            }
        };

        // 裸词素可能吞入了终止符前的空格，去掉尾部空白再分类；
        // 引号词素保留原文
        let text = if quoted {
            self.lexeme.clone()
        } else {
            self.lexeme.trim_end().to_string()
        };

        if is_key {
            let key = Token::with_value(JsonTokenKind::ObjectKey, span, TokenValue::Str(text));

            // 连续两个键：上一个键缺值，本次补 null，新键延迟一拍
            if self.last == Some(JsonTokenKind::ObjectKey) {
                trace!(target: "lenjo::reader", "Consecutive keys, deferring new key");
                self.pending = Some(key);
                return self.emit(Token::new(
                    JsonTokenKind::Null,
                    SourceSpan::at(self.token_start),
                ));
            }

            return self.emit(key);
        }

        let token = if quoted {
            Token::with_value(JsonTokenKind::String, span, TokenValue::Str(text))
        } else {
            classify_bare(text, span)
        };

        self.emit(token)
    }
}

/// 裸词素的值分类
///
/// 空词素与（忽略大小写的）null/true/false 优先；首字符像数字则走
/// 数字尝试链，链上全败回落为字符串；其余一律字符串。
fn classify_bare(text: String, span: SourceSpan) -> Token<JsonTokenKind> {
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        return Token::new(JsonTokenKind::Null, span);
    }
    if text.eq_ignore_ascii_case("true") {
        return Token::with_value(JsonTokenKind::Boolean, span, TokenValue::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Token::with_value(JsonTokenKind::Boolean, span, TokenValue::Bool(false));
    }

    let numeric_lead = matches!(
        text.chars().next(),
        Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.')
    );
    if numeric_lead {
        if let Some(value) = parse_number(&text) {
            return Token::with_value(JsonTokenKind::Number, span, value);
        }
    }

    Token::with_value(JsonTokenKind::String, span, TokenValue::Str(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_stream(input: &str) -> CharStream {
        let mut stream = CharStream::new(1024);
        stream.feed(input.as_bytes()).unwrap();
        stream.close().unwrap();
        stream
    }

    fn collect_tokens(input: &str) -> Vec<Token<JsonTokenKind>> {
        let mut stream = create_stream(input);
        let mut scanner = JsonScanner::new();
        let mut tokens = Vec::new();

        loop {
            match scanner.next_token(&mut stream) {
                ScanResult::Token(t) => tokens.push(t),
                ScanResult::Eof => break,
                ScanResult::Incomplete => {
                    panic!("Unexpected incomplete");
                }
            }
        }

        tokens
    }

    fn kinds(tokens: &[Token<JsonTokenKind>]) -> Vec<JsonTokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_structural_tokens() {
        let tokens = collect_tokens("{ [ ] }");
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ObjectStart,
                JsonTokenKind::ArrayStart,
                JsonTokenKind::ArrayEnd,
                JsonTokenKind::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_quoted_string_value() {
        let tokens = collect_tokens(r#"["hello world"]"#);
        assert_eq!(tokens[1].kind, JsonTokenKind::String);
        assert_eq!(tokens[1].value, TokenValue::Str("hello world".to_string()));
    }

    #[test]
    fn test_quoted_string_escape() {
        // 转义判定只看前一个字符，反斜杠原样保留
        let tokens = collect_tokens(r#"["a\"b"]"#);
        assert_eq!(tokens[1].value, TokenValue::Str(r#"a\"b"#.to_string()));
    }

    #[test]
    fn test_object_key_and_value() {
        let tokens = collect_tokens(r#"{"a": 1}"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ObjectStart,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Number,
                JsonTokenKind::ObjectEnd,
            ]
        );
        assert_eq!(tokens[1].value, TokenValue::Str("a".to_string()));
        assert_eq!(tokens[2].value, TokenValue::Int32(1));
    }

    #[test]
    fn test_bare_key() {
        let tokens = collect_tokens("{a: b}");
        assert_eq!(tokens[1].kind, JsonTokenKind::ObjectKey);
        assert_eq!(tokens[1].value, TokenValue::Str("a".to_string()));
        assert_eq!(tokens[2].kind, JsonTokenKind::String);
        assert_eq!(tokens[2].value, TokenValue::Str("b".to_string()));
    }

    #[test]
    fn test_key_detected_across_newline() {
        // 词素结束后越过空白窥视：换行后的冒号仍判定为键
        let tokens = collect_tokens("{a\n: 1}");
        assert_eq!(tokens[1].kind, JsonTokenKind::ObjectKey);
    }

    #[test]
    fn test_missing_separators() {
        // 分隔符全部省略也能切出标量
        let tokens = collect_tokens("[1\n2\n3]");
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ArrayStart,
                JsonTokenKind::Number,
                JsonTokenKind::Number,
                JsonTokenKind::Number,
                JsonTokenKind::ArrayEnd,
            ]
        );
    }

    #[test]
    fn test_repeated_separators_skipped() {
        let tokens = collect_tokens("[1,,,2]");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].value, TokenValue::Int32(1));
        assert_eq!(tokens[2].value, TokenValue::Int32(2));
    }

    #[test]
    fn test_null_synthesized_before_object_end() {
        let tokens = collect_tokens(r#"{"a":}"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ObjectStart,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Null,
                JsonTokenKind::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_null_synthesized_before_array_end() {
        let tokens = collect_tokens(r#"["k":]"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ArrayStart,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Null,
                JsonTokenKind::ArrayEnd,
            ]
        );
    }

    #[test]
    fn test_null_synthesized_between_keys() {
        let tokens = collect_tokens(r#"{"a":,"b":1}"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ObjectStart,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Null,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Number,
                JsonTokenKind::ObjectEnd,
            ]
        );
        assert_eq!(tokens[1].value, TokenValue::Str("a".to_string()));
        assert_eq!(tokens[3].value, TokenValue::Str("b".to_string()));
    }

    #[test]
    fn test_consecutive_valueless_keys_each_get_null() {
        // 每个缺值的键各补一个 null，不合并也不吞键
        let tokens = collect_tokens(r#"{"a":"b":1}"#);
        assert_eq!(
            kinds(&tokens),
            vec![
                JsonTokenKind::ObjectStart,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Null,
                JsonTokenKind::ObjectKey,
                JsonTokenKind::Number,
                JsonTokenKind::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_literal_case_insensitive() {
        let tokens = collect_tokens("[TRUE, False, NULL, nuLL]");
        assert_eq!(tokens[1].value, TokenValue::Bool(true));
        assert_eq!(tokens[2].value, TokenValue::Bool(false));
        assert_eq!(tokens[3].kind, JsonTokenKind::Null);
        assert_eq!(tokens[4].kind, JsonTokenKind::Null);
    }

    #[test]
    fn test_bare_scalar_with_spaces() {
        // 空格不是终止符，裸标量可含空格；尾部空白不计入
        let tokens = collect_tokens("{a: hello world}");
        assert_eq!(tokens[2].kind, JsonTokenKind::String);
        assert_eq!(tokens[2].value, TokenValue::Str("hello world".to_string()));
    }

    #[test]
    fn test_bare_number_trailing_space() {
        let tokens = collect_tokens("{a: 42 }");
        assert_eq!(tokens[2].kind, JsonTokenKind::Number);
        assert_eq!(tokens[2].value, TokenValue::Int32(42));
    }

    #[test]
    fn test_numeric_looking_string_degrades() {
        let tokens = collect_tokens("[1.2.3]");
        assert_eq!(tokens[1].kind, JsonTokenKind::String);
        assert_eq!(tokens[1].value, TokenValue::Str("1.2.3".to_string()));
    }

    #[test]
    fn test_hash_terminates_bare_lexeme() {
        // `#` 仅终止词素，不跳过注释
        let tokens = collect_tokens("[abc#def]");
        assert_eq!(tokens[1].value, TokenValue::Str("abc".to_string()));
        assert_eq!(tokens[2].value, TokenValue::Str("#def".to_string()));
    }

    #[test]
    fn test_unterminated_string_kept() {
        let tokens = collect_tokens(r#"["abc"#);
        assert_eq!(tokens[1].kind, JsonTokenKind::String);
        assert_eq!(tokens[1].value, TokenValue::Str("abc".to_string()));
    }

    #[test]
    fn test_unterminated_bare_lexeme_kept() {
        let tokens = collect_tokens("[tru");
        assert_eq!(tokens[1].kind, JsonTokenKind::String);
        assert_eq!(tokens[1].value, TokenValue::Str("tru".to_string()));
    }

    #[test]
    fn test_span_positions() {
        let tokens = collect_tokens(r#"{"a": 1}"#);
        // '{' 在 1:1
        assert_eq!(tokens[0].start().line, 1);
        assert_eq!(tokens[0].start().column, 1);
        // 键从 1:2 的引号开始
        assert_eq!(tokens[1].start().column, 2);
        // 数字 1 在 1:7
        assert_eq!(tokens[2].start().column, 7);
    }

    #[test]
    fn test_empty_input() {
        let tokens = collect_tokens("");
        assert!(tokens.is_empty());

        let tokens = collect_tokens("  \n\t ,,: ");
        assert!(tokens.is_empty());
    }
}
