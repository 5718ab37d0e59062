use bumpalo::Bump;

use crate::syntax::Expr;

/// Replaces every free occurrence of `name` in `expr` with `replacement`,
/// building the rewritten tree in `bump`. The input is never mutated.
///
/// A `let` that rebinds `name` shadows it: the binding's init is still
/// substituted into, the body is left untouched.
///
/// Not capture-avoiding: there is no alpha-renaming, so a free variable in
/// `replacement` that collides with a binder inside `expr` will be captured.
/// Trees built by the evaluators only ever substitute closed values, which
/// cannot be captured.
pub fn subst<'core>(
    bump: &'core Bump,
    expr: &'core Expr<'core>,
    name: &str,
    replacement: &'core Expr<'core>,
) -> &'core Expr<'core> {
    match *expr {
        Expr::Var(y) if y == name => replacement,
        Expr::Int(_) | Expr::Bool(_) | Expr::Var(_) => expr,

        Expr::Binop(op, lhs, rhs) => {
            let lhs = subst(bump, lhs, name, replacement);
            let rhs = subst(bump, rhs, name, replacement);
            bump.alloc(Expr::Binop(op, lhs, rhs))
        }
        Expr::Let(y, init, body) => {
            let init = subst(bump, init, name, replacement);
            let body = if y == name {
                body
            } else {
                subst(bump, body, name, replacement)
            };
            bump.alloc(Expr::Let(y, init, body))
        }
        Expr::If(cond, then, r#else) => {
            let cond = subst(bump, cond, name, replacement);
            let then = subst(bump, then, name, replacement);
            let r#else = subst(bump, r#else, name, replacement);
            bump.alloc(Expr::If(cond, then, r#else))
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{expect, Expect};

    use super::*;
    use crate::syntax::Binop;

    #[track_caller]
    fn assert_subst(expr: &Expr, name: &str, replacement: &Expr, expect: Expect) {
        let bump = Bump::new();
        let expr = subst(&bump, expr, name, replacement);
        expect.assert_eq(&format!("{expr}"));
    }

    #[test]
    fn test_subst_var_hit() {
        assert_subst(&Expr::Var("x"), "x", &Expr::Int(42), expect!["42"]);
    }

    #[test]
    fn test_subst_var_miss() {
        assert_subst(&Expr::Var("y"), "x", &Expr::Int(42), expect!["y"]);
    }

    #[test]
    fn test_subst_literals_unchanged() {
        assert_subst(&Expr::Int(1), "x", &Expr::Int(42), expect!["1"]);
        assert_subst(&Expr::Bool(true), "x", &Expr::Int(42), expect!["true"]);
    }

    #[test]
    fn test_subst_binop_both_sides() {
        let expr = Expr::Binop(Binop::Add, &Expr::Var("x"), &Expr::Var("x"));
        assert_subst(&expr, "x", &Expr::Int(2), expect!["2 + 2"]);
    }

    #[test]
    fn test_subst_if_all_three() {
        let expr = Expr::If(&Expr::Var("x"), &Expr::Var("x"), &Expr::Var("x"));
        assert_subst(&expr, "x", &Expr::Bool(true), expect!["if true then true else true"]);
    }

    #[test]
    fn test_subst_let_shadowing() {
        // the rebound x obscures the outer one inside the body
        let expr = Expr::Let("x", &Expr::Var("x"), &Expr::Var("x"));
        assert_subst(&expr, "x", &Expr::Int(1), expect!["let x = 1 in x"]);
    }

    #[test]
    fn test_subst_let_no_shadowing() {
        let body = Expr::Binop(Binop::Add, &Expr::Var("x"), &Expr::Var("y"));
        let expr = Expr::Let("y", &Expr::Int(0), &body);
        assert_subst(&expr, "x", &Expr::Int(5), expect!["let y = 0 in 5 + y"]);
    }

    #[test]
    fn test_subst_capture_is_not_avoided() {
        // substituting an open expression under a like-named binder captures
        // its free variable; the documented limitation, pinned down here
        let body = Expr::Binop(Binop::Add, &Expr::Var("x"), &Expr::Var("y"));
        let expr = Expr::Let("y", &Expr::Int(0), &body);
        assert_subst(&expr, "x", &Expr::Var("y"), expect!["let y = 0 in y + y"]);
    }
}
