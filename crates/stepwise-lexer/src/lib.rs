//! Lexical syntax
//! ```text
//! Token ::= Trivia | Atom
//!
//! Trivia ::= Whitespace | LineComment | BlockComment
//! Whitespace ::= WhitespaceChar+
//! LineComment ::= "//" (not LineTerminator)*
//! BlockComment ::= "/*" (BlockComment | AnyChar)* "*/"
//!
//! Atom ::= Delimiter | Operator | Keyword | Ident | Number
//!
//! Delimiter ::= '(' | ')'
//! Operator ::= '+' | '*' | "<=" | '='
//! Keyword ::= "let" | "in" | "if" | "then" | "else" | "true" | "false"
//!
//! Ident ::=
//!     | XID_Start XID_Continue*
//!     | '_' XID_Continue*
//!
//! Number ::= '-'? DecimalDigit XID_Continue*
//! ```
//!
//! A `Number` deliberately swallows trailing identifier characters; the
//! parser rejects the malformed literal with a range to point at.

use text_size::{TextRange, TextSize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'text> {
    pub kind: TokenKind,
    pub range: TextRange,
    pub text: &'text str,
}

impl<'text> Token<'text> {
    pub const fn new(kind: TokenKind, range: TextRange, text: &'text str) -> Self {
        Self { kind, range, text }
    }

    pub const fn kind(&self) -> TokenKind { self.kind }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Error
    UnknownChar(char),

    // Trivia
    Whitespace,
    LineComment,
    BlockComment,

    // Delimiters and operators
    LParen,
    RParen,
    Plus,
    Star,
    LessEq,
    Eq,

    // Keywords
    KwLet,
    KwIn,
    KwIf,
    KwThen,
    KwElse,
    KwTrue,
    KwFalse,

    // Atoms
    Ident,
    Number,
}

impl TokenKind {
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::UnknownChar(_) => "unknown character",
            Self::Whitespace => "whitespace",
            Self::LineComment | Self::BlockComment => "comment",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Plus => "`+`",
            Self::Star => "`*`",
            Self::LessEq => "`<=`",
            Self::Eq => "`=`",
            Self::KwLet => "`let`",
            Self::KwIn => "`in`",
            Self::KwIf => "`if`",
            Self::KwThen => "`then`",
            Self::KwElse => "`else`",
            Self::KwTrue => "`true`",
            Self::KwFalse => "`false`",
            Self::Ident => "identifier",
            Self::Number => "integer literal",
        }
    }
}

mod classify {
    pub fn is_ident_start(c: char) -> bool { unicode_ident::is_xid_start(c) || c == '_' }
    pub fn is_ident_continue(c: char) -> bool { unicode_ident::is_xid_continue(c) }
}

fn text_size(pos: usize) -> TextSize {
    TextSize::try_from(pos).expect("source text longer than u32::MAX bytes")
}

pub fn lex(mut text: &str) -> impl Iterator<Item = Token<'_>> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        let (kind, len) = next_token(text)?;
        let start = pos;
        let end = start + len;
        pos = end;

        let token_text = &text[..len];
        text = &text[len..];

        let token_range = TextRange::new(text_size(start), text_size(end));
        Some(Token::new(kind, token_range, token_text))
    })
}

pub fn next_token(text: &str) -> Option<(TokenKind, usize)> {
    let c = text.chars().next()?;

    let (kind, len) = match c {
        c if c.is_whitespace() => (TokenKind::Whitespace, whitespace(text)),
        '(' => (TokenKind::LParen, 1),
        ')' => (TokenKind::RParen, 1),
        '+' => (TokenKind::Plus, 1),
        '*' => (TokenKind::Star, 1),
        '=' => (TokenKind::Eq, 1),
        '<' => match text.as_bytes().get(1) {
            Some(b'=') => (TokenKind::LessEq, 2),
            _ => (TokenKind::UnknownChar(c), 1),
        },
        '/' => match text.as_bytes().get(1) {
            Some(b'/') => (TokenKind::LineComment, line_comment(text)),
            Some(b'*') => (TokenKind::BlockComment, block_comment(text)),
            _ => (TokenKind::UnknownChar(c), 1),
        },
        '-' => match text.as_bytes().get(1) {
            Some(b'0'..=b'9') => (TokenKind::Number, 1 + number(&text[1..])),
            _ => (TokenKind::UnknownChar(c), 1),
        },
        '0'..='9' => (TokenKind::Number, number(text)),
        c if classify::is_ident_start(c) => {
            let len = ident(text);
            (keyword_or_ident(&text[..len]), len)
        }
        c => (TokenKind::UnknownChar(c), c.len_utf8()),
    };

    Some((kind, len))
}

fn keyword_or_ident(text: &str) -> TokenKind {
    match text {
        "let" => TokenKind::KwLet,
        "in" => TokenKind::KwIn,
        "if" => TokenKind::KwIf,
        "then" => TokenKind::KwThen,
        "else" => TokenKind::KwElse,
        "true" => TokenKind::KwTrue,
        "false" => TokenKind::KwFalse,
        _ => TokenKind::Ident,
    }
}

fn whitespace(text: &str) -> usize {
    debug_assert!(text.starts_with(char::is_whitespace));
    text.find(|c: char| !c.is_whitespace()).unwrap_or(text.len())
}

fn ident(text: &str) -> usize {
    debug_assert!(text.starts_with(classify::is_ident_start));
    text.find(|c| !classify::is_ident_continue(c))
        .unwrap_or(text.len())
}

fn number(text: &str) -> usize {
    debug_assert!(text.starts_with(|c: char| c.is_ascii_digit()));
    text.find(|c| !classify::is_ident_continue(c))
        .unwrap_or(text.len())
}

fn line_comment(text: &str) -> usize {
    debug_assert!(text.starts_with("//"));
    text.find('\n').unwrap_or(text.len())
}

fn block_comment(text: &str) -> usize {
    debug_assert!(text.starts_with("/*"));

    let mut depth: u32 = 1;
    let mut iter = text.as_bytes().iter().enumerate().skip(2);

    while let Some((_, byte)) = iter.next() {
        match byte {
            b'*' => match iter.next() {
                Some((idx, b'/')) => {
                    depth -= 1;
                    if depth == 0 {
                        return idx + 1;
                    }
                }
                Some(..) => continue,
                None => break,
            },
            b'/' => match iter.next() {
                Some((_, b'*')) => depth += 1,
                Some(..) => continue,
                None => break,
            },
            _ => continue,
        }
    }

    text.len()
}
