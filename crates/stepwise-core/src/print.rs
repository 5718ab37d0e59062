use core::fmt;
use std::fmt::Write;

use crate::syntax::{Binop, Expr};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    Atom,

    Mul,
    Add,
    Cmp,

    Let,
    If,
}

impl Prec {
    pub const MAX: Self = Self::If;

    pub fn of_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Int(_) | Expr::Bool(_) | Expr::Var(_) => Self::Atom,
            Expr::Binop(op, ..) => Self::of_binop(*op),
            Expr::Let(..) => Self::Let,
            Expr::If(..) => Self::If,
        }
    }

    pub const fn of_binop(binop: Binop) -> Self {
        match binop {
            Binop::Add => Self::Add,
            Binop::Mul => Self::Mul,
            Binop::Leq => Self::Cmp,
        }
    }
}

fn parens<W: Write>(
    out: &mut W,
    cond: bool,
    mut f: impl FnMut(&mut W) -> fmt::Result,
) -> fmt::Result {
    if cond {
        out.write_char('(')?;
    }
    f(out)?;
    if cond {
        out.write_char(')')?;
    }
    Ok(())
}

pub fn expr_prec(out: &mut impl Write, expr: &Expr, prec: Prec) -> fmt::Result {
    parens(out, Prec::of_expr(expr) > prec, |out| match expr {
        Expr::Int(n) => write!(out, "{n}"),
        Expr::Bool(b) => write!(out, "{b}"),
        Expr::Var(name) => write!(out, "{name}"),
        Expr::Binop(op, lhs, rhs) => {
            expr_prec(out, lhs, Prec::of_binop(*op))?;
            write!(out, " {op} ")?;
            expr_prec(out, rhs, Prec::of_binop(*op))
        }
        Expr::Let(name, init, body) => {
            write!(out, "let {name} = ")?;
            expr_prec(out, init, Prec::Cmp)?;
            write!(out, " in ")?;
            expr_prec(out, body, Prec::Let)
        }
        Expr::If(cond, then, r#else) => {
            write!(out, "if ")?;
            expr_prec(out, cond, Prec::Cmp)?;
            write!(out, " then ")?;
            expr_prec(out, then, Prec::Cmp)?;
            write!(out, " else ")?;
            expr_prec(out, r#else, Prec::Cmp)
        }
    })
}

impl fmt::Display for Binop {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => out.write_char('+'),
            Self::Mul => out.write_char('*'),
            Self::Leq => out.write_str("<="),
        }
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result { expr_prec(out, self, Prec::MAX) }
}
