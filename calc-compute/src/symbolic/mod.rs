//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`calc_parser::ast::Expr`] nodes produced by [`calc_parser`], with the main
//! difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`calc_parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! If you have a [`calc_parser::ast::Expr`], you can convert it to a [`SymExpr`] using the
//! [`TryFrom`] trait. Conversion is lossy, as [`SymExpr`] does not store span information, and
//! any integral, derivative or sum found in the AST is evaluated on the way.
//!
//! ```
//! use calc_compute::symbolic::expr::SymExpr;
//!
//! let ast = calc_parser::parse_plain("x + (y + z)").unwrap();
//! let expr = SymExpr::try_from(ast).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! Results are reduced to a canonical form with the [`simplify()`] function. Simplification
//! applies the rules in [`simplify::rules`] to every node of the expression, bottom-up, until no
//! rule applies anymore.
//!
//! ```
//! use calc_compute::symbolic::{expr::SymExpr, simplify};
//!
//! let ast = calc_parser::parse_plain("x + x + x").unwrap();
//! let simplified = simplify(&SymExpr::try_from(ast).unwrap());
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified, SymExpr::Mul(vec![SymExpr::integer(3), SymExpr::symbol("x")]));
//! ```
//!
//! # Calculus
//!
//! The [`mod@derivative`], [`mod@integral`] and [`mod@summation`] modules build on top of the
//! simplifier to compute derivatives, antiderivatives and sums symbolically.

pub mod derivative;
pub mod eval;
pub mod expand;
pub mod expr;
pub mod integral;
pub mod polynomial;
pub mod simplify;
pub mod step_collector;
pub mod substitute;
pub mod summation;

pub use expand::expand;
pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
