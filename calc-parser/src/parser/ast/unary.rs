use crate::parser::{
    ast::expr::Expr,
    fmt::fmt_operand,
    token::op::UnaryOp,
};
use std::{fmt, ops::Range};

/// A unary expression, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Creates the negation of the given operand.
    pub fn neg(op_span: Range<usize>, operand: Expr) -> Self {
        let span = op_span.start..operand.span().end;
        Self {
            operand: Box::new(operand),
            op: UnaryOp::neg(op_span),
            span,
        }
    }

    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        // `-x**2` already means `-(x**2)`, so only lower precedences need parentheses
        fmt_operand(f, &self.operand, self.op.precedence(), false)
    }
}
