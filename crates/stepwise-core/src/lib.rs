//! The expression language and its two evaluation strategies.
//!
//! Evaluation resolves bindings by substituting into the syntax tree itself;
//! there is no runtime environment. The small-step relation rewrites the
//! expression one redex at a time until it is a value, while the big-step
//! relation computes the value directly by structural recursion. The two are
//! deliberately independent implementations and must agree on every
//! terminating, well-formed program.

pub mod eval;
pub mod print;
pub mod subst;
pub mod syntax;
