//! Symbolic computation for calculus problems.
//!
//! Expressions parsed by [`calc_parser`] are converted into the flattened [`SymExpr`]
//! representation, which the [`symbolic`] module can simplify, expand, differentiate, integrate
//! and sum. The results can be printed as LaTeX through the [`Latex`] trait.
//!
//! Most callers only need [`Problem`], which classifies a parsed expression as an integral,
//! derivative or sum, and computes its result:
//!
//! ```
//! use calc_compute::{Latex, Problem};
//!
//! let ast = calc_parser::parse_latex(r"\frac{d}{dx} x^3").unwrap();
//! let problem = Problem::try_from(ast).unwrap();
//! let result = problem.evaluate().unwrap();
//! assert_eq!(result.as_display().to_string(), "3 x^{2}");
//! ```

pub mod error;
pub mod latex;
pub mod primitive;
pub mod problem;
pub mod symbolic;

pub use error::ComputeError;
pub use latex::Latex;
pub use problem::Problem;
pub use symbolic::SymExpr;
