use core::fmt;

use crate::syntax::{Binop, Expr};

pub mod big_step;
pub mod small_step;

/// Terminal evaluation failures. There is no recovery and no partial result;
/// each pipeline propagates the first error to its caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EvalError<'core> {
    /// A variable survived to evaluation without an enclosing `let` binding it.
    UnboundVar(&'core str),

    /// A binary operator was applied to operands that are not both integers.
    BinopTypeMismatch {
        op: Binop,
        lhs: &'core Expr<'core>,
        rhs: &'core Expr<'core>,
    },

    /// The guard of an `if` evaluated to a non-boolean value.
    IfGuardNotBool(&'core Expr<'core>),

    /// The two branches of an `if` differ in type. Evaluation picks exactly
    /// one branch and never inspects the other, so no evaluator constructs
    /// this; it names what a static type-checking pass would report, and no
    /// such pass runs in this crate.
    IfBranchMismatch,
}

impl fmt::Display for EvalError<'_> {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnboundVar(name) => write!(out, "unbound variable `{name}`"),
            Self::BinopTypeMismatch { op, lhs, rhs } => {
                write!(out, "operator `{op}` expects integer operands, got `{lhs}` and `{rhs}`")
            }
            Self::IfGuardNotBool(guard) => {
                write!(out, "`if` guard must be a boolean, got `{guard}`")
            }
            Self::IfBranchMismatch => write!(out, "`if` branches must have the same type"),
        }
    }
}

impl std::error::Error for EvalError<'_> {}

impl Binop {
    /// Applies a primitive operator to two operands that are already values.
    /// Integer arithmetic wraps on overflow.
    pub fn apply<'core>(
        self,
        lhs: &'core Expr<'core>,
        rhs: &'core Expr<'core>,
    ) -> Result<Expr<'core>, EvalError<'core>> {
        match (self, lhs, rhs) {
            (Self::Add, Expr::Int(lhs), Expr::Int(rhs)) => Ok(Expr::Int(lhs.wrapping_add(*rhs))),
            (Self::Mul, Expr::Int(lhs), Expr::Int(rhs)) => Ok(Expr::Int(lhs.wrapping_mul(*rhs))),
            (Self::Leq, Expr::Int(lhs), Expr::Int(rhs)) => Ok(Expr::Bool(lhs <= rhs)),
            _ => Err(EvalError::BinopTypeMismatch { op: self, lhs, rhs }),
        }
    }
}
