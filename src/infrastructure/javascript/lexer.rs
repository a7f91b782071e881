//! Logos-based lexer for JavaScript config modules
//!
//! Only the tokens needed to read literal values are recognized. Any other
//! character comes out as a token with no kind, which the parser skips outside
//! of the exported value and reports inside it.

use std::ops::Range;

use logos::Logos;

/// A token with its kind, text, and byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// `None` for characters the lexer does not recognize
    pub kind: Option<TokenKind>,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl Token<'_> {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == Some(TokenKind::Ident) && self.text == name
    }
}

/// Tokenize an entire module, comments and whitespace dropped
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        tokens.push(Token {
            kind: result.ok(),
            text: lexer.slice(),
            span: lexer.span(),
        });
    }
    tokens
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let before = &input[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\n\f]+|//[^\n]*|/\*([^*]|\*+[^*/])*\*+/)")]
pub enum TokenKind {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    #[token("=")]
    Eq,

    #[token("-")]
    Minus,

    #[token("+")]
    Plus,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    #[token("undefined")]
    Undefined,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    DoubleQuoted,

    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    SingleQuoted,

    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Template,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexNumber,

    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,
}
