use crate::parser::{
    ast::expr::Expr,
    fmt::fmt_operand,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Precedence,
};
use std::{fmt, ops::Range};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Creates a binary expression spanning both operands.
    pub fn new(lhs: Expr, op: BinOp, rhs: Expr) -> Self {
        let span = lhs.span().start..rhs.span().end;
        Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }
    }

    /// Creates a binary expression with an explicit span, for operators written before their
    /// operands, like `\frac{a}{b}`.
    pub fn with_span(lhs: Expr, op: BinOp, rhs: Expr, span: Range<usize>) -> Self {
        Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }
    }

    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if this is the implicit product of two juxtaposed expressions.
    pub fn is_implicit(&self) -> bool {
        self.op.kind == BinOpKind::Mul && self.op.implicit
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let precedence = self.op.precedence();
        let (left_strict, right_strict) = match self.op.associativity() {
            Associativity::Left => (false, true),
            Associativity::Right => (true, false),
        };

        // a negated base needs parentheses, since `-x**2` means `-(x**2)`
        let lhs_precedence = if precedence == Precedence::Exp {
            Precedence::Atom
        } else {
            precedence
        };
        fmt_operand(f, &self.lhs, lhs_precedence, left_strict && lhs_precedence != Precedence::Atom)?;
        self.op.fmt(f)?;
        fmt_operand(f, &self.rhs, precedence, right_strict)
    }
}
