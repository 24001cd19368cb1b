//! Errors reported to users of the solver.

use calc_compute::ComputeError;
use std::io;
use thiserror::Error;

/// The input could not be turned into a problem.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is neither valid LaTeX nor valid plain notation. Both parser errors are kept so
    /// that their diagnostics can be shown.
    #[error("Could not parse expression as LaTeX or symbolic syntax. Check for missing braces or unsupported commands.")]
    Syntax {
        /// The error from the LaTeX parser.
        latex: calc_parser::Error,

        /// The error from the plain notation parser.
        plain: calc_parser::Error,
    },

    /// The input parsed, but a calculus operation nested inside it could not be computed.
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

impl ParseError {
    /// Prints the diagnostics of both parse attempts to stderr. Does nothing for errors that did
    /// not come from a parser.
    pub fn report_to_stderr(&self, input: &str) -> io::Result<()> {
        if let Self::Syntax { latex, plain } = self {
            latex.report_to_stderr("latex", input)?;
            plain.report_to_stderr("plain", input)?;
        }
        Ok(())
    }
}

/// A parsed problem could not be solved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The input is not an integral, derivative or sum.
    #[error("Unsupported expression type")]
    Unsupported,

    /// The computation failed, for example because an integral has no closed form.
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// Any error produced while solving an input string.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
