//! The three calculus operators: integrals, derivatives, and sums.

use crate::parser::ast::{expr::Expr, literal::LitSym};
use std::{fmt, ops::Range};

/// The lower and upper bounds of a definite integral or a sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// The lower bound.
    pub lower: Box<Expr>,

    /// The upper bound.
    pub upper: Box<Expr>,
}

impl Bounds {
    /// Creates bounds from the given expressions.
    pub fn new(lower: Expr, upper: Expr) -> Self {
        Self { lower: Box::new(lower), upper: Box::new(upper) }
    }
}

/// An integral, such as `\int_0^1 x^2 dx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Integral {
    /// The expression to integrate.
    pub integrand: Box<Expr>,

    /// The variable of integration, named by the differential.
    pub variable: LitSym,

    /// The bounds of a definite integral.
    pub bounds: Option<Bounds>,

    /// The region of the source code that this integral was parsed from.
    pub span: Range<usize>,
}

impl Integral {
    /// Returns the span of the integral.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Integral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Integral({}, ", self.integrand)?;
        match &self.bounds {
            Some(bounds) => write!(f, "({}, {}, {}))", self.variable, bounds.lower, bounds.upper),
            None => write!(f, "{})", self.variable),
        }
    }
}

/// A derivative, such as `\frac{d}{dx} x^2` or `\frac{d^2}{dx^2} \sin x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivative {
    /// The expression to differentiate.
    pub expr: Box<Expr>,

    /// The variable to differentiate with respect to.
    pub variable: LitSym,

    /// How many times to differentiate. Always at least 1.
    pub order: u32,

    /// The region of the source code that this derivative was parsed from.
    pub span: Range<usize>,
}

impl Derivative {
    /// Returns the span of the derivative.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Derivative {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Derivative({}, {}", self.expr, self.variable)?;
        if self.order != 1 {
            write!(f, ", {}", self.order)?;
        }
        write!(f, ")")
    }
}

/// A sum over an integer index, such as `\sum_{n=1}^{10} n^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    /// The expression summed for each value of the index.
    pub summand: Box<Expr>,

    /// The index variable.
    pub variable: LitSym,

    /// The first and last values of the index, inclusive.
    pub bounds: Bounds,

    /// The region of the source code that this sum was parsed from.
    pub span: Range<usize>,
}

impl Sum {
    /// Returns the span of the sum.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Sum({}, ({}, {}, {}))",
            self.summand,
            self.variable,
            self.bounds.lower,
            self.bounds.upper,
        )
    }
}
