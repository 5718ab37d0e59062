use std::io::Read;

use bumpalo::Bump;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use stepwise_core::eval::{big_step, small_step};
use stepwise_core::syntax::Expr;

#[derive(Parser)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate by repeatedly applying one-step reductions
    SmallStep {
        path: PathOrStdin,

        /// Print each intermediate expression
        #[arg(long)]
        trace: bool,
    },

    /// Evaluate by direct structural recursion
    BigStep { path: PathOrStdin },
}

#[derive(Clone, Debug)]
pub enum PathOrStdin {
    Stdin,
    Path(Utf8PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Stdin),
            _ => Ok(Self::Path(Utf8PathBuf::from(s))),
        }
    }
}

impl PathOrStdin {
    pub fn read(&self) -> std::io::Result<String> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            Self::Path(path) => std::fs::read_to_string(path),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stdin => "<stdin>",
            Self::Path(path) => path.as_str(),
        }
    }
}

/// Parse, then normalize with the small-step relation. Parse and evaluation
/// failures both surface as diagnostics.
pub fn interpret_small_step<'core>(
    bump: &'core Bump,
    file_id: usize,
    text: &'core str,
) -> Result<&'core Expr<'core>, Diagnostic<usize>> {
    let expr = stepwise_parser::parse_expr(bump, file_id, text)?;
    small_step::eval(bump, expr).map_err(|error| Diagnostic::error().with_message(error.to_string()))
}

/// Like [`interpret_small_step`], recording the reduction sequence in
/// `trace`.
pub fn interpret_small_step_trace<'core>(
    bump: &'core Bump,
    file_id: usize,
    text: &'core str,
    trace: &mut String,
) -> Result<&'core Expr<'core>, Diagnostic<usize>> {
    let expr = stepwise_parser::parse_expr(bump, file_id, text)?;
    small_step::eval_trace(bump, expr, trace)
        .map_err(|error| Diagnostic::error().with_message(error.to_string()))
}

/// Parse, then evaluate with the big-step relation. Equivalent to
/// [`interpret_small_step`] on every input where both terminate.
pub fn interpret_big_step<'core>(
    bump: &'core Bump,
    file_id: usize,
    text: &'core str,
) -> Result<&'core Expr<'core>, Diagnostic<usize>> {
    let expr = stepwise_parser::parse_expr(bump, file_id, text)?;
    big_step::eval(bump, expr).map_err(|error| Diagnostic::error().with_message(error.to_string()))
}
