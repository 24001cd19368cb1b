use std::{fmt, ops::Range};

/// A number literal, such as `3` or `2.5`, represented as a [`String`] so that no precision is
/// lost before the value reaches the algebra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitNum {
    /// The digits of the number literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol or identifier, such as `x`, `theta` or `x_1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A well-known mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,

    /// Positive infinity, only meaningful as a bound of a sum.
    Infinity,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constant::Pi => write!(f, "pi"),
            Constant::E => write!(f, "E"),
            Constant::Infinity => write!(f, "oo"),
        }
    }
}

/// A constant literal, such as `\pi` or `oo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitConst {
    /// The constant.
    pub constant: Constant,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
    Constant(LitConst),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
            Literal::Constant(constant) => constant.span.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
            Literal::Constant(constant) => constant.constant.fmt(f),
        }
    }
}
