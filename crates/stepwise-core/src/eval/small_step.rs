use core::fmt;

use bumpalo::Bump;

use super::EvalError;
use crate::subst::subst;
use crate::syntax::Expr;

/// The redex that fired in a single reduction, for tracing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    Binop,
    Let,
    IfTrue,
    IfFalse,
}

impl fmt::Display for Rule {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Binop => out.write_str("[binop]"),
            Self::Let => out.write_str("[let]"),
            Self::IfTrue => out.write_str("[if-true]"),
            Self::IfFalse => out.write_str("[if-false]"),
        }
    }
}

/// Rewrites a non-value expression by one step, reducing sub-expressions in
/// left-to-right call-by-value order.
///
/// # Panics
///
/// Panics if `expr` is already a value; callers must check `is_value` first.
pub fn step<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
) -> Result<&'core Expr<'core>, EvalError<'core>> {
    let (expr, _) = step_rule(bump, expr)?;
    Ok(expr)
}

fn step_rule<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
) -> Result<(&'core Expr<'core>, Rule), EvalError<'core>> {
    match *expr {
        Expr::Int(_) | Expr::Bool(_) => panic!("tried to step a value: {expr}"),
        Expr::Var(name) => Err(EvalError::UnboundVar(name)),

        Expr::Binop(op, lhs, rhs) => {
            if lhs.is_value() && rhs.is_value() {
                Ok((bump.alloc(op.apply(lhs, rhs)?), Rule::Binop))
            } else if lhs.is_value() {
                let (rhs, rule) = step_rule(bump, rhs)?;
                Ok((bump.alloc(Expr::Binop(op, lhs, rhs)), rule))
            } else {
                let (lhs, rule) = step_rule(bump, lhs)?;
                Ok((bump.alloc(Expr::Binop(op, lhs, rhs)), rule))
            }
        }

        // once the bound expression is a value, the substitution is the step
        // and the `let` node disappears
        Expr::Let(name, init, body) => {
            if init.is_value() {
                Ok((subst(bump, body, name, init), Rule::Let))
            } else {
                let (init, rule) = step_rule(bump, init)?;
                Ok((bump.alloc(Expr::Let(name, init, body)), rule))
            }
        }

        Expr::If(cond, then, r#else) => match cond {
            Expr::Bool(true) => Ok((then, Rule::IfTrue)),
            Expr::Bool(false) => Ok((r#else, Rule::IfFalse)),
            _ if cond.is_value() => Err(EvalError::IfGuardNotBool(cond)),
            _ => {
                let (cond, rule) = step_rule(bump, cond)?;
                Ok((bump.alloc(Expr::If(cond, then, r#else)), rule))
            }
        },
    }
}

/// Small step semantics: step repeatedly until the expression is a value.
///
/// The loop is unbounded; the language has no construct that recurses, so
/// every well-typed input reaches a value.
pub fn eval<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
) -> Result<&'core Expr<'core>, EvalError<'core>> {
    let mut expr = expr;
    while !expr.is_value() {
        expr = step(bump, expr)?;
    }
    Ok(expr)
}

/// Like [`eval`], but records the initial expression and every intermediate
/// expression, one `[rule]=> expr` line per reduction.
pub fn eval_trace<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
    output: &mut String,
) -> Result<&'core Expr<'core>, EvalError<'core>> {
    let mut expr = expr;
    output.push_str(&format!("{expr}\n"));
    while !expr.is_value() {
        let (next, rule) = step_rule(bump, expr)?;
        output.push_str(&format!("{rule}=> {next}\n"));
        expr = next;
    }
    Ok(expr)
}
