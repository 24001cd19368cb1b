//! A step-by-step solver for calculus problems.
//!
//! An expression is parsed as LaTeX first, and as the plain symbolic notation if that fails. The
//! resulting integral, derivative or sum is computed with [`calc_compute`], and the solution is
//! described in a few lines of text with embedded LaTeX:
//!
//! ```
//! use calculus_solver::{parse_expression, solve_expression};
//!
//! let problem = parse_expression(r"\frac{d}{dx} x^2").unwrap();
//! let solution = solve_expression(&problem).unwrap();
//! assert_eq!(solution.to_string(), "Given derivative $$\\frac{d}{d x} x^{2}$$\nComputing the derivative:\n$$ 2 x $$");
//! ```
//!
//! The `calculus-solver` binary prints solutions to the terminal, and `calculus-web` serves them
//! through an HTML form.

pub mod error;
pub mod logging;
pub mod solver;
pub mod web;

pub use error::{Error, ParseError, SolveError};
pub use solver::{parse_expression, solve, solve_expression, ProblemKind, Solution};
