//! Reads the exported literal of a JavaScript config module
//!
//! Supports `module.exports = <value>` and `export default <value>`, where the
//! value is an object/array literal or the name of a top-level `const`, `let`
//! or `var` bound to one. Literal values follow JavaScript rules: unquoted and
//! numeric keys, trailing commas, single/double/backtick strings, hex and
//! signed numbers, and `undefined` (read as `null`).

use serde_json::{Map, Number, Value as JsonValue};

use super::lexer::{Token, TokenKind, line_column, tokenize};
use crate::conversion::ConversionError;

/// Parse `source` and return its exported value as JSON
pub fn parse_module_exports(source: &str) -> Result<JsonValue, ConversionError> {
    let parser = ModuleParser::new(source);
    parser.exported_value()
}

/// Parse a single literal expression, e.g. `{ a: [1, 'b'] }`
pub fn parse_literal(source: &str) -> Result<JsonValue, ConversionError> {
    let mut parser = ModuleParser::new(source);
    let value = parser.parse_value()?;
    if let Some(token) = parser.peek().filter(|t| !t.is(TokenKind::Semicolon)) {
        return Err(parser.error_at(token, format!("unexpected `{}` after value", token.text)));
    }
    Ok(value)
}

struct ModuleParser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> ModuleParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    fn exported_value(mut self) -> Result<JsonValue, ConversionError> {
        let start = self.find_export().ok_or_else(|| ConversionError::ParseError {
            line: 1,
            column: 1,
            message: "no `module.exports =` or `export default` found".to_string(),
        })?;
        self.pos = start;

        // `module.exports = config;` refers to an earlier declaration
        if let Some(token) = self.peek().filter(|t| t.is(TokenKind::Ident)) {
            let name = token.text;
            let next = self.tokens.get(start + 1);
            let is_reference = next.is_none_or(|t| t.is(TokenKind::Semicolon));
            if is_reference {
                let token = token.clone();
                self.pos = self.find_declaration(name).ok_or_else(|| {
                    self.error_at(
                        &token,
                        format!("exported binding `{name}` is not declared at the top level"),
                    )
                })?;
            }
        }

        self.parse_value()
    }

    /// Index of the first token of the exported value
    fn find_export(&self) -> Option<usize> {
        let tokens = &self.tokens;
        (0..tokens.len()).find_map(|i| {
            let window = &tokens[i..];
            match window {
                [module, dot, exports, eq, ..]
                    if module.is_ident("module")
                        && dot.is(TokenKind::Dot)
                        && exports.is_ident("exports")
                        && eq.is(TokenKind::Eq) =>
                {
                    Some(i + 4)
                }
                [export, default, ..] if export.is_ident("export") && default.is_ident("default") => {
                    Some(i + 2)
                }
                _ => None,
            }
        })
    }

    /// Index of the initializer of `const|let|var <name> =`
    fn find_declaration(&self, name: &str) -> Option<usize> {
        let tokens = &self.tokens;
        (0..tokens.len()).find_map(|i| match &tokens[i..] {
            [keyword, ident, eq, ..]
                if ["const", "let", "var"].iter().any(|k| keyword.is_ident(k))
                    && ident.is_ident(name)
                    && eq.is(TokenKind::Eq) =>
            {
                Some(i + 3)
            }
            _ => None,
        })
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Result<Token<'a>, ConversionError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error_at_end("unexpected end of input"))?;
        self.pos += 1;
        Ok(token)
    }

    fn parse_value(&mut self) -> Result<JsonValue, ConversionError> {
        let token = self.next_token()?;
        match token.kind {
            Some(TokenKind::LBrace) => self.parse_object(),
            Some(TokenKind::LBracket) => self.parse_array(),
            Some(TokenKind::DoubleQuoted) | Some(TokenKind::SingleQuoted) => {
                self.string_value(&token).map(JsonValue::String)
            }
            Some(TokenKind::Template) => {
                if token.text.contains("${") {
                    return Err(self.error_at(&token, "template interpolation is not supported"));
                }
                self.string_value(&token).map(JsonValue::String)
            }
            Some(TokenKind::Number) | Some(TokenKind::HexNumber) => {
                self.number_value(&token, false)
            }
            Some(TokenKind::Minus) | Some(TokenKind::Plus) => {
                let negative = token.is(TokenKind::Minus);
                let operand = self.next_token()?;
                match operand.kind {
                    Some(TokenKind::Number) | Some(TokenKind::HexNumber) => {
                        self.number_value(&operand, negative)
                    }
                    _ => Err(self.error_at(
                        &operand,
                        format!("expected a number after `{}`", token.text),
                    )),
                }
            }
            Some(TokenKind::True) => Ok(JsonValue::Bool(true)),
            Some(TokenKind::False) => Ok(JsonValue::Bool(false)),
            Some(TokenKind::Null) | Some(TokenKind::Undefined) => Ok(JsonValue::Null),
            Some(TokenKind::Ident) => Err(self.error_at(
                &token,
                format!(
                    "`{}` is not a literal value; only literals can be converted",
                    token.text
                ),
            )),
            Some(_) => Err(self.error_at(&token, format!("unexpected `{}`", token.text))),
            None => Err(self.error_at(&token, format!("unexpected character `{}`", token.text))),
        }
    }

    fn parse_object(&mut self) -> Result<JsonValue, ConversionError> {
        let mut map = Map::new();

        loop {
            let token = self.next_token()?;
            let key = match token.kind {
                Some(TokenKind::RBrace) => break,
                Some(
                    TokenKind::Ident
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
                    | TokenKind::Undefined,
                ) => token.text.to_string(),
                Some(TokenKind::DoubleQuoted | TokenKind::SingleQuoted) => {
                    self.string_value(&token)?
                }
                Some(TokenKind::Number | TokenKind::HexNumber) => {
                    match self.number_value(&token, false)? {
                        JsonValue::Number(n) => numeric_key(&n),
                        _ => token.text.to_string(),
                    }
                }
                _ => {
                    return Err(self.error_at(
                        &token,
                        format!("expected a property name, found `{}`", token.text),
                    ));
                }
            };

            let separator = self.next_token()?;
            match separator.kind {
                Some(TokenKind::Colon) => {}
                Some(TokenKind::Comma | TokenKind::RBrace) if token.is(TokenKind::Ident) => {
                    return Err(self.error_at(
                        &token,
                        format!("shorthand property `{key}` refers to a runtime value"),
                    ));
                }
                _ => {
                    return Err(self.error_at(
                        &separator,
                        format!("expected `:` after property `{key}`"),
                    ));
                }
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            let token = self.next_token()?;
            match token.kind {
                Some(TokenKind::Comma) => continue,
                Some(TokenKind::RBrace) => break,
                _ => {
                    return Err(self.error_at(
                        &token,
                        format!("expected `,` or `}}`, found `{}`", token.text),
                    ));
                }
            }
        }

        Ok(JsonValue::Object(map))
    }

    fn parse_array(&mut self) -> Result<JsonValue, ConversionError> {
        let mut items = Vec::new();

        loop {
            if self.peek().is_some_and(|t| t.is(TokenKind::RBracket)) {
                self.pos += 1;
                break;
            }
            if let Some(token) = self.peek().filter(|t| t.is(TokenKind::Comma)) {
                return Err(self.error_at(token, "array holes are not supported"));
            }

            items.push(self.parse_value()?);

            let token = self.next_token()?;
            match token.kind {
                Some(TokenKind::Comma) => continue,
                Some(TokenKind::RBracket) => break,
                _ => {
                    return Err(self.error_at(
                        &token,
                        format!("expected `,` or `]`, found `{}`", token.text),
                    ));
                }
            }
        }

        Ok(JsonValue::Array(items))
    }

    fn string_value(&self, token: &Token<'_>) -> Result<String, ConversionError> {
        let inner = &token.text[1..token.text.len() - 1];
        unescape(inner).map_err(|message| self.error_at(token, message))
    }

    fn number_value(&self, token: &Token<'_>, negative: bool) -> Result<JsonValue, ConversionError> {
        let text = token.text;
        let invalid = || self.error_at(token, format!("invalid number `{text}`"));

        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            let value = i64::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return Ok(JsonValue::from(if negative { -value } else { value }));
        }

        if !text.contains(['.', 'e', 'E']) {
            if let Ok(value) = text.parse::<i64>() {
                return Ok(JsonValue::from(if negative { -value } else { value }));
            }
        }

        let value: f64 = text.parse().map_err(|_| invalid())?;
        let value = if negative { -value } else { value };
        Number::from_f64(value)
            .map(JsonValue::Number)
            .ok_or_else(invalid)
    }

    fn error_at(&self, token: &Token<'_>, message: impl Into<String>) -> ConversionError {
        let (line, column) = line_column(self.source, token.span.start);
        ConversionError::ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    fn error_at_end(&self, message: impl Into<String>) -> ConversionError {
        let (line, column) = line_column(self.source, self.source.len());
        ConversionError::ParseError {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Resolve the escape sequences of a string literal body
fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            return Err("unterminated escape sequence".to_string());
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(hex_char(&hex)?);
            }
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut hex = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) if hex.len() < 6 => hex.push(c),
                            _ => return Err("unterminated unicode escape".to_string()),
                        }
                    }
                    parse_hex(&hex)?
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 {
                        return Err(format!("invalid unicode escape `\\u{hex}`"));
                    }
                    parse_hex(&hex)?
                };

                if (0xD800..0xDC00).contains(&code) {
                    // High surrogate, expect `\uXXXX` low surrogate next
                    let rest: String = chars.clone().take(6).collect();
                    let low = rest
                        .strip_prefix("\\u")
                        .filter(|hex| hex.len() == 4)
                        .map(parse_hex)
                        .transpose()?
                        .filter(|low| (0xDC00..0xE000).contains(low))
                        .ok_or_else(|| "unpaired surrogate in unicode escape".to_string())?;
                    for _ in 0..6 {
                        chars.next();
                    }
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(to_char(combined)?);
                } else {
                    out.push(to_char(code)?);
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Property name a numeric key converts to, `1e3` and `1000.0` both give `1000`
fn numeric_key(number: &Number) -> String {
    match (number.as_i64(), number.as_f64()) {
        (Some(int), _) => int.to_string(),
        (None, Some(float)) => float.to_string(),
        _ => number.to_string(),
    }
}

fn parse_hex(hex: &str) -> Result<u32, String> {
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex escape `{hex}`"));
    }
    u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex escape `{hex}`"))
}

fn hex_char(hex: &str) -> Result<char, String> {
    if hex.len() != 2 {
        return Err(format!("invalid hex escape `{hex}`"));
    }
    to_char(parse_hex(hex)?)
}

fn to_char(code: u32) -> Result<char, String> {
    char::from_u32(code).ok_or_else(|| format!("invalid code point U+{code:X}"))
}
