//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](calc_parser::ast::Expr) type from `calc_parser` is a recursive `enum` that
//! represents the AST of a mathematical expression. It's convenient for parsing, but not so much
//! for algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], which flattens the AST into lists of terms or
//! factors, and normalizes the expression into a sum of products. Subtraction becomes addition
//! of a `-1` multiple, and division becomes multiplication by a `-1` power.
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is hard, since there are infinitely
//! many ways to write the same expression. `x^2 + 2x + 1` and `(x + 1)^2` are equal, but that is
//! only obvious after expanding or factoring.
//!
//! Instead, the [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict
//! equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//! etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, and it is cheap to compute without any
//! simplification. The simplifier uses it to find like terms and like factors.

mod convert;
mod iter;

use calc_parser::{
    ast::Constant,
    parser::{token::op::BinOpKind, Precedence},
};
use iter::ExprIter;
use rug::Rational;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub},
};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational number, such as `2` or `3/4`.
    Number(Rational),

    /// A well-known constant, such as `pi` or `e`.
    Constant(Constant),

    /// A variable, such as `x` or `theta`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `log(x)`.
    Call(String, Vec<SymExpr>),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Constant(constant) => write!(f, "{}", constant),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are numbers, the numbers are added together.
/// Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::number(lhs + rhs),
            (lhs, rhs) => SymExpr::Add(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are numbers, the numbers are multiplied
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::number(lhs * rhs),
            (lhs, rhs) => SymExpr::Mul(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`calc_parser::ast::Expr`] type, which is produced
/// by [`calc_parser`]. The main difference is that this type **flattens** out the tree structure.
/// For example, the expression `x + (y + z)` would be represented internally as a single
/// [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Writes the operand, wrapped in parentheses if it binds looser than its parent.
        fn operand(f: &mut fmt::Formatter<'_>, operand: &SymExpr, parent: &SymExpr) -> fmt::Result {
            if operand.cmp_precedence(parent) == Ordering::Less {
                write!(f, "({})", operand)
            } else {
                write!(f, "{}", operand)
            }
        }

        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    operand(f, factor, self)?;
                    for factor in iter {
                        write!(f, " * ")?;
                        operand(f, factor, self)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                // `^` is right-associative, so a power base always needs parentheses
                if matches!(**base, Self::Exp(..)) {
                    write!(f, "({})", base)?;
                } else {
                    operand(f, base, self)?;
                }
                write!(f, "^")?;
                operand(f, exp, self)
            },
        }
    }
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn integer(n: i64) -> Self {
        Self::Primary(Primary::Number(Rational::from(n)))
    }

    /// Creates a rational number expression.
    pub fn number(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }

    /// Creates a symbol expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a constant expression.
    pub fn constant(constant: Constant) -> Self {
        Self::Primary(Primary::Constant(constant))
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates the expression `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns the reciprocal of this expression. Non-zero numbers are inverted directly,
    /// everything else is raised to the power of -1.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Number(n)) if n != 0 => Self::number(n.recip()),
            expr => Self::pow(expr, Self::integer(-1)),
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::number(Rational::from((1, 2))))
    }

    /// Returns the precedence of the expression when printed in plain notation.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Primary(Primary::Number(n)) => {
                if *n.denom() != 1 {
                    BinOpKind::Div.precedence()
                } else if *n < 0 {
                    Precedence::Neg
                } else {
                    Precedence::Atom
                }
            },
            Self::Primary(_) => Precedence::Atom,
            Self::Add(_) => BinOpKind::Add.precedence(),
            Self::Mul(_) => BinOpKind::Mul.precedence(),
            Self::Exp(_, _) => BinOpKind::Exp.precedence(),
        }
    }

    /// Compares the precedence of this expression with another.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`], returns the contained number.
    pub fn into_number(self) -> Option<Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// Returns true if the expression is a [`Primary::Number`] with no fractional part.
    pub fn is_integer(&self) -> bool {
        self.as_number().is_some_and(|n| *n.denom() == 1)
    }

    /// Returns true if the expression is the number 0.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 0)
    }

    /// Returns true if the expression is the number 1.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// Returns true if the expression is the given constant.
    pub fn is_constant(&self, constant: Constant) -> bool {
        matches!(self, Self::Primary(Primary::Constant(c)) if *c == constant)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a call to the function with the given name, returns its arguments.
    pub fn as_call(&self, name: &str) -> Option<&[SymExpr]> {
        match self {
            Self::Primary(Primary::Call(target, args)) if target == name => Some(args),
            _ => None,
        }
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter()
            .any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if no symbol appears anywhere in the expression, i.e. the expression is a
    /// constant.
    pub fn is_numeric(&self) -> bool {
        !self.post_order_iter()
            .any(|expr| matches!(expr, Self::Primary(Primary::Symbol(_))))
    }

    /// Returns true if infinity appears anywhere in the expression.
    pub fn contains_infinity(&self) -> bool {
        self.post_order_iter()
            .any(|expr| expr.is_constant(Constant::Infinity))
    }

    /// Returns true if the expression divides by zero or takes the logarithm of zero anywhere.
    pub fn is_undefined(&self) -> bool {
        self.post_order_iter().any(|expr| match expr {
            Self::Exp(base, exp) => base.is_zero() && exp.as_number().is_some_and(|n| *n <= 0),
            expr => matches!(expr.as_call("log"), Some([arg]) if arg.is_zero()),
        })
    }

    /// Splits the factors of the expression into those that depend on the given variable and
    /// those that do not, returning `(independent, dependent)`.
    pub fn split_factors(&self, var: &str) -> (SymExpr, SymExpr) {
        let factors = match self {
            Self::Mul(factors) => factors.as_slice(),
            expr => std::slice::from_ref(expr),
        };

        let (dependent, independent): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.contains_symbol(var));
        (Self::Mul(independent).downgrade(), Self::Mul(dependent).downgrade())
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }
}

/// Returns true if both lists contain strictly equal expressions, in any order.
fn same_elements(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|lhs| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, rhs)| !used[i] && lhs == rhs);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together. The behavior is the same as [`Add`].
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Subtracts two [`SymExpr`]s, by adding the negation of the right-hand side.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. The behavior is the same as [`Mul`].
impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Divides two [`SymExpr`]s, by multiplying with the reciprocal of the right-hand side.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            expr => Self::integer(-1) * expr,
        }
    }
}

/// NOTE: Strict equality allows different orderings of terms and factors, but
/// `pretty_assertions` doesn't care about order, so the diff of a failing test can be messy.
#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given plain expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = parse_plain(input).unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2*(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // semantically equal, but not strictly equal
        let a = parse_expr("2*(x + (y - 5))");
        let b = parse_expr("2*x + 2*y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = parse_expr("x + x + y");
        let b = parse_expr("x + y + y");
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x**2 + 5*x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::integer(6),
            SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::integer(5)]),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::integer(2)),
        ]));
    }

    #[test]
    fn division_and_subtraction() {
        let expr = parse_expr("x/y - z");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Mul(vec![
                SymExpr::symbol("x"),
                SymExpr::pow(SymExpr::symbol("y"), SymExpr::integer(-1)),
            ]),
            SymExpr::Mul(vec![SymExpr::integer(-1), SymExpr::symbol("z")]),
        ]));
    }

    #[test]
    fn contains_symbol_in_call() {
        let expr = parse_expr("3*sin(x**2) + y");
        assert!(expr.contains_symbol("x"));
        assert!(expr.contains_symbol("y"));
        assert!(!expr.contains_symbol("z"));
        assert!(!expr.is_numeric());
        assert!(parse_expr("sin(pi/2) + 3").is_numeric());
    }

    #[test]
    fn split_factors() {
        let expr = parse_expr("3*a*x**2*sin(x)");
        let (independent, dependent) = expr.split_factors("x");
        assert_eq!(independent, parse_expr("3*a"));
        assert_eq!(dependent, parse_expr("x**2*sin(x)"));
    }

    #[test]
    fn fmt_expr() {
        let expr = parse_expr("(x + 1)**2 * y / 2");
        assert_eq!(expr.to_string(), "(x + 1)^2 * y * 1/2");
    }

    #[test]
    fn fmt_negative_base() {
        let expr = SymExpr::pow(SymExpr::integer(-2), SymExpr::number(Rational::from((1, 3))));
        assert_eq!(expr.to_string(), "(-2)^(1/3)");
    }
}
