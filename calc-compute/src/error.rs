//! Errors produced while converting or computing calculus problems.

use thiserror::Error;

/// A derivative could not be computed symbolically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivativeError {
    /// The function may be differentiable, but its derivative is not known.
    #[error("cannot differentiate the function `{0}`")]
    UnsupportedFunction(String),

    /// The expression contains infinity, which has no derivative.
    #[error("cannot differentiate an expression containing infinity")]
    Infinity,

    /// The derivative divides by zero or takes the logarithm of zero.
    #[error("the derivative of {0} is undefined")]
    Undefined(String),
}

/// An integral could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegralError {
    /// None of the integration strategies produced an antiderivative.
    #[error("no closed form found for the integral of {0}")]
    NoClosedForm(String),

    /// A bound of a definite integral is infinite.
    #[error("improper integrals with infinite bounds are not supported")]
    InfiniteBounds,

    /// The antiderivative is undefined at one of the bounds.
    #[error("the integral is undefined at the bound {0}")]
    UndefinedAtBound(String),
}

/// A sum could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SumError {
    /// The sum grows without bound.
    #[error("the sum diverges")]
    Diverges,

    /// The lower bound of the sum is infinite.
    #[error("the lower bound of a sum must be finite")]
    InfiniteLowerBound,

    /// None of the summation strategies could evaluate the sum.
    #[error("cannot evaluate the sum of {0}")]
    CannotEvaluate(String),

    /// A term of the sum divides by zero or takes the logarithm of zero.
    #[error("the sum is undefined at {var} = {index}")]
    UndefinedTerm { var: String, index: String },

    /// The closed form of the sum divides by zero or takes the logarithm of zero.
    #[error("the sum of {0} is undefined")]
    Undefined(String),
}

/// An expression could not be evaluated to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression contains a symbol with no value.
    #[error("the symbol `{0}` has no value")]
    UnboundSymbol(String),

    /// The expression calls a function with no numerical implementation.
    #[error("cannot evaluate the function `{0}`")]
    UnknownFunction(String),
}

/// Any error produced while computing the result of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    #[error(transparent)]
    Derivative(#[from] DerivativeError),

    #[error(transparent)]
    Integral(#[from] IntegralError),

    #[error(transparent)]
    Sum(#[from] SumError),

    /// A number literal could not be represented exactly.
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
}
