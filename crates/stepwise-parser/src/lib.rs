//! Concrete syntax
//! ```text
//! Expr ::=
//!     | "let" Ident "=" Expr "in" Expr
//!     | "if" Expr "then" Expr "else" Expr
//!     | Cmp
//!
//! Cmp  ::= Add ("<=" Add)?
//! Add  ::= Mul ("+" Mul)*
//! Mul  ::= Atom ("*" Atom)*
//! Atom ::= Number | "true" | "false" | Ident | "(" Expr ")"
//! ```
//!
//! `+` and `*` are left-associative; `<=` does not chain. The parser either
//! produces a well-formed tree or fails with a single syntax diagnostic.

use bumpalo::Bump;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use stepwise_core::syntax::{Binop, Expr};
use stepwise_lexer::{Token, TokenKind};
use text_size::{TextRange, TextSize};

pub type ParseError = Diagnostic<usize>;

pub fn parse_expr<'core>(
    bump: &'core Bump,
    file_id: usize,
    text: &'core str,
) -> Result<&'core Expr<'core>, ParseError> {
    let tokens: Vec<_> = stepwise_lexer::lex(text)
        .filter(|token| !token.kind().is_trivia())
        .collect();

    if let Some(token) = tokens
        .iter()
        .find(|token| matches!(token.kind, TokenKind::UnknownChar(_)))
    {
        return Err(Diagnostic::error()
            .with_message("Syntax error: unknown character")
            .with_labels(vec![Label::primary(file_id, token.range)
                .with_message("not part of any token")]));
    }

    let mut parser = Parser {
        bump,
        file_id,
        text,
        tokens: &tokens,
        pos: 0,
    };
    let expr = parser.expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser<'core, 'tokens> {
    bump: &'core Bump,
    file_id: usize,
    text: &'core str,
    tokens: &'tokens [Token<'core>],
    pos: usize,
}

// Inspecting and advancing through tokens
impl<'core> Parser<'core, '_> {
    fn peek(&self) -> Option<Token<'core>> { self.tokens.get(self.pos).copied() }

    fn peek_kind(&self) -> Option<TokenKind> { self.peek().map(|token| token.kind) }

    fn at(&self, kind: TokenKind) -> bool { self.peek_kind() == Some(kind) }

    fn advance(&mut self) -> Option<Token<'core>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn advance_if_at(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'core>, ParseError> {
        if self.at(kind) {
            return Ok(self.advance().unwrap());
        }
        Err(self.expected(kind.description()))
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.pos == self.tokens.len() {
            return Ok(());
        }
        Err(self.expected("end of file"))
    }
}

// Reporting errors
impl Parser<'_, '_> {
    fn eof_range(&self) -> TextRange { TextRange::empty(TextSize::of(self.text)) }

    fn expected(&self, expected: &str) -> ParseError {
        let (message, range) = match self.peek() {
            Some(token) => (
                format!("Syntax error: unexpected {}", token.kind.description()),
                token.range,
            ),
            None => (
                String::from("Syntax error: unexpected end of file"),
                self.eof_range(),
            ),
        };
        Diagnostic::error().with_message(message).with_labels(vec![
            Label::primary(self.file_id, range).with_message(format!("expected {expected}")),
        ])
    }
}

// The grammar
impl<'core> Parser<'core, '_> {
    fn expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::KwLet) => self.let_expr(),
            Some(TokenKind::KwIf) => self.if_expr(),
            _ => self.cmp_expr(),
        }
    }

    fn let_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        self.expect(TokenKind::KwLet)?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::Eq)?;
        let init = self.expr()?;
        self.expect(TokenKind::KwIn)?;
        let body = self.expr()?;
        Ok(self.bump.alloc(Expr::Let(name, init, body)))
    }

    fn if_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        self.expect(TokenKind::KwIf)?;
        let cond = self.expr()?;
        self.expect(TokenKind::KwThen)?;
        let then = self.expr()?;
        self.expect(TokenKind::KwElse)?;
        let r#else = self.expr()?;
        Ok(self.bump.alloc(Expr::If(cond, then, r#else)))
    }

    fn cmp_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        let lhs = self.add_expr()?;
        if self.advance_if_at(TokenKind::LessEq) {
            let rhs = self.add_expr()?;
            return Ok(self.bump.alloc(Expr::Binop(Binop::Leq, lhs, rhs)));
        }
        Ok(lhs)
    }

    fn add_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        let mut lhs = self.mul_expr()?;
        while self.advance_if_at(TokenKind::Plus) {
            let rhs = self.mul_expr()?;
            lhs = self.bump.alloc(Expr::Binop(Binop::Add, lhs, rhs));
        }
        Ok(lhs)
    }

    fn mul_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        let mut lhs = self.atom_expr()?;
        while self.advance_if_at(TokenKind::Star) {
            let rhs = self.atom_expr()?;
            lhs = self.bump.alloc(Expr::Binop(Binop::Mul, lhs, rhs));
        }
        Ok(lhs)
    }

    fn atom_expr(&mut self) -> Result<&'core Expr<'core>, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Number) => {
                let token = self.advance().unwrap();
                let n = token.text.parse::<i64>().map_err(|_| {
                    Diagnostic::error()
                        .with_message(format!(
                            "Syntax error: invalid integer literal `{}`",
                            token.text
                        ))
                        .with_labels(vec![Label::primary(self.file_id, token.range)
                            .with_message("not a 64-bit integer")])
                })?;
                Ok(self.bump.alloc(Expr::Int(n)))
            }
            Some(TokenKind::KwTrue) => {
                self.pos += 1;
                Ok(self.bump.alloc(Expr::Bool(true)))
            }
            Some(TokenKind::KwFalse) => {
                self.pos += 1;
                Ok(self.bump.alloc(Expr::Bool(false)))
            }
            Some(TokenKind::Ident) => {
                let token = self.advance().unwrap();
                Ok(self.bump.alloc(Expr::Var(token.text)))
            }
            Some(TokenKind::LParen) => {
                self.pos += 1;
                let expr = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.expected("an expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{expect, Expect};

    use super::*;

    #[track_caller]
    fn assert_parse(text: &str, expect: Expect) {
        let bump = Bump::new();
        let got = match parse_expr(&bump, 0, text) {
            Ok(expr) => format!("{expr}"),
            Err(diagnostic) => {
                let label = &diagnostic.labels[0];
                format!("error: {} ({})", diagnostic.message, label.message)
            }
        };
        expect.assert_eq(&got);
    }

    #[track_caller]
    fn assert_parse_debug(text: &str, expect: Expect) {
        let bump = Bump::new();
        let expr = parse_expr(&bump, 0, text).unwrap();
        expect.assert_eq(&format!("{expr:?}"));
    }

    #[test]
    fn atoms() {
        assert_parse("42", expect!["42"]);
        assert_parse("-7", expect!["-7"]);
        assert_parse("true", expect!["true"]);
        assert_parse("false", expect!["false"]);
        assert_parse("x", expect!["x"]);
        assert_parse("(42)", expect!["42"]);
    }

    #[test]
    fn precedence() {
        assert_parse("1 + 2 * 3", expect!["1 + 2 * 3"]);
        assert_parse_debug(
            "1 + 2 * 3",
            expect!["Binop(Add, Int(1), Binop(Mul, Int(2), Int(3)))"],
        );

        assert_parse("(1 + 2) * 3", expect!["(1 + 2) * 3"]);
        assert_parse("1 + 2 <= 3 * 4", expect!["1 + 2 <= 3 * 4"]);
    }

    #[test]
    fn left_associativity() {
        assert_parse_debug(
            "1 + 2 + 3",
            expect!["Binop(Add, Binop(Add, Int(1), Int(2)), Int(3))"],
        );
        assert_parse_debug(
            "2 * 3 * 4",
            expect!["Binop(Mul, Binop(Mul, Int(2), Int(3)), Int(4))"],
        );
    }

    #[test]
    fn let_expr() {
        assert_parse("let x = 5 in x + 1", expect!["let x = 5 in x + 1"]);
        assert_parse(
            "let x = let y = 1 in y in x",
            expect!["let x = (let y = 1 in y) in x"],
        );
        assert_parse(
            "let x = (let y = 1 in y) in x",
            expect!["let x = (let y = 1 in y) in x"],
        );
    }

    #[test]
    fn if_expr() {
        assert_parse(
            "if x <= 3 then 1 else 0",
            expect!["if x <= 3 then 1 else 0"],
        );
        assert_parse(
            "if b then 1 else if c then 2 else 3",
            expect!["if b then 1 else (if c then 2 else 3)"],
        );
    }

    #[test]
    fn comments() {
        assert_parse("1 + // one\n 2", expect!["1 + 2"]);
        assert_parse("/* block */ true", expect!["true"]);
    }

    #[test]
    fn error_empty() {
        assert_parse(
            "",
            expect!["error: Syntax error: unexpected end of file (expected an expression)"],
        );
    }

    #[test]
    fn error_trailing_operator() {
        assert_parse(
            "1 +",
            expect!["error: Syntax error: unexpected end of file (expected an expression)"],
        );
    }

    #[test]
    fn error_missing_eq() {
        assert_parse(
            "let x 5 in x",
            expect!["error: Syntax error: unexpected integer literal (expected `=`)"],
        );
    }

    #[test]
    fn error_unclosed_paren() {
        assert_parse(
            "(1",
            expect!["error: Syntax error: unexpected end of file (expected `)`)"],
        );
    }

    #[test]
    fn error_trailing_tokens() {
        assert_parse(
            "1 2",
            expect!["error: Syntax error: unexpected integer literal (expected end of file)"],
        );
        assert_parse(
            "1 <= 2 <= 3",
            expect!["error: Syntax error: unexpected `<=` (expected end of file)"],
        );
    }

    #[test]
    fn error_bad_literal() {
        assert_parse(
            "123abc",
            expect!["error: Syntax error: invalid integer literal `123abc` (not a 64-bit integer)"],
        );
        assert_parse(
            "9223372036854775808",
            expect![
                "error: Syntax error: invalid integer literal `9223372036854775808` (not a 64-bit integer)"
            ],
        );
    }

    #[test]
    fn error_unknown_character() {
        assert_parse(
            "1 % 2",
            expect!["error: Syntax error: unknown character (not part of any token)"],
        );
    }
}
