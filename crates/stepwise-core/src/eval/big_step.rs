use bumpalo::Bump;

use super::EvalError;
use crate::subst::subst;
use crate::syntax::Expr;

/// Big step semantics: compute the final value directly by structural
/// recursion, evaluating sub-expressions to values and combining them.
pub fn eval<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
) -> Result<&'core Expr<'core>, EvalError<'core>> {
    match *expr {
        Expr::Int(_) | Expr::Bool(_) => Ok(expr),
        Expr::Var(name) => Err(EvalError::UnboundVar(name)),

        Expr::Binop(op, lhs, rhs) => {
            let lhs = eval(bump, lhs)?;
            let rhs = eval(bump, rhs)?;
            Ok(bump.alloc(op.apply(lhs, rhs)?))
        }

        Expr::Let(name, init, body) => {
            let init = eval(bump, init)?;
            eval(bump, subst(bump, body, name, init))
        }

        Expr::If(cond, then, r#else) => match eval(bump, cond)? {
            Expr::Bool(true) => eval(bump, then),
            Expr::Bool(false) => eval(bump, r#else),
            cond => Err(EvalError::IfGuardNotBool(cond)),
        },
    }
}
