use crate::parser::{
    ast::{
        binary::Binary,
        calculus::{Derivative, Integral, Sum},
        call::Call,
        literal::Literal,
        paren::Paren,
        unary::Unary,
    },
    Precedence,
};
use std::{fmt, ops::Range};

/// Represents any expression of either notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A grouped expression.
    Paren(Paren),

    /// A function call.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `x + 1`.
    Binary(Binary),

    /// An integral.
    Integral(Integral),

    /// A derivative.
    Derivative(Derivative),

    /// A sum.
    Sum(Sum),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Integral(integral) => integral.span(),
            Expr::Derivative(derivative) => derivative.span(),
            Expr::Sum(sum) => sum.span(),
        }
    }

    /// Returns the precedence of the outermost operation of the expression, used to decide where
    /// parentheses are needed when formatting.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Unary(unary) => unary.op.precedence(),
            Expr::Binary(binary) => binary.op.precedence(),
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_)
                | Expr::Integral(_) | Expr::Derivative(_) | Expr::Sum(_) => Precedence::Atom,
        }
    }

    /// Returns the innermost expression, removing any number of enclosing groups.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Returns true if the expression is an integral, derivative or sum.
    pub fn is_calculus(&self) -> bool {
        matches!(self.innermost(), Expr::Integral(_) | Expr::Derivative(_) | Expr::Sum(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
            Expr::Integral(integral) => integral.fmt(f),
            Expr::Derivative(derivative) => derivative.fmt(f),
            Expr::Sum(sum) => sum.fmt(f),
        }
    }
}
