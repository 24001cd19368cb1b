//! LaTeX output for symbolic expressions.
//!
//! The output follows the conventions of common computer algebra systems: products are written
//! with spaces (`2 x`), quotients with `\frac`, and function arguments are always wrapped in
//! `\left( \right)`, as in `\sin{\left(x \right)}`. Terms of a sum are ordered by descending
//! degree, with constant terms last.

use calc_parser::ast::Constant;
use crate::symbolic::expr::{Primary, SymExpr};
use rug::Rational;
use std::{cmp::Reverse, fmt::{self, Display, Formatter}};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt_latex(f)
    }
}

/// Names of symbols that are written as Greek letters.
const GREEK_LETTERS: [&str; 35] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi", "omega",
    "varepsilon", "vartheta", "varphi",
    "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Omega",
];

/// Functions that have their own LaTeX command.
const FUNCTIONS: [&str; 10] = ["sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh", "log"];

/// Functions whose powers are written on the function name, as in `\sin^{2}{\left(x \right)}`.
const POWER_FUNCTIONS: [&str; 9] = ["sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh"];

/// Formats a symbol name, writing Greek letters as commands and subscripts in braces.
///
/// `theta_1` -> `\theta_{1}`
pub fn fmt_symbol(f: &mut Formatter, name: &str) -> fmt::Result {
    let (base, subscript) = match name.split_once('_') {
        Some((base, subscript)) => (base, Some(subscript)),
        None => (name, None),
    };

    if GREEK_LETTERS.contains(&base) {
        write!(f, "\\{}", base)?;
    } else {
        write!(f, "{}", base)?;
    }
    if let Some(subscript) = subscript {
        write!(f, "_{{{}}}", subscript)?;
    }
    Ok(())
}

/// Formats an operand of an operator written in front of it, like `\int` or `\sum`, wrapping sums
/// in parentheses.
pub fn fmt_operand(f: &mut Formatter, operand: &SymExpr) -> fmt::Result {
    if matches!(operand, SymExpr::Add(_)) {
        write!(f, "\\left({}\\right)", operand.as_display())
    } else {
        operand.fmt_latex(f)
    }
}

fn fmt_rational(f: &mut Formatter, n: &Rational) -> fmt::Result {
    if *n.denom() == 1 {
        write!(f, "{}", n.numer())
    } else if *n < 0 {
        write!(f, "- \\frac{{{}}}{{{}}}", -n.numer().clone(), n.denom())
    } else {
        write!(f, "\\frac{{{}}}{{{}}}", n.numer(), n.denom())
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => fmt_rational(f, n),
            Self::Constant(Constant::Pi) => write!(f, "\\pi"),
            Self::Constant(Constant::E) => write!(f, "e"),
            Self::Constant(Constant::Infinity) => write!(f, "\\infty"),
            Self::Symbol(name) => fmt_symbol(f, name),
            Self::Call(name, args) => {
                if FUNCTIONS.contains(&name.as_str()) {
                    write!(f, "\\{}", name)?;
                } else if name.chars().count() > 1 {
                    write!(f, "\\operatorname{{{}}}", name)?;
                } else {
                    write!(f, "{}", name)?;
                }
                write!(f, "{{\\left(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_latex(f)?;
                }
                write!(f, " \\right)}}")
            },
        }
    }
}

/// The total degree of a term in its symbols, used to order the terms of a sum.
fn degree(term: &SymExpr) -> Rational {
    match term {
        SymExpr::Primary(Primary::Symbol(_)) => Rational::from(1),
        SymExpr::Exp(base, exp) if base.as_symbol().is_some() => exp.as_number()
            .cloned()
            .unwrap_or_else(|| Rational::from(1)),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        _ => Rational::new(),
    }
}

/// If the term has a negative numeric coefficient, returns the term with the coefficient negated.
fn negated(term: &SymExpr) -> Option<SymExpr> {
    match term {
        SymExpr::Primary(Primary::Number(n)) if *n < 0 => Some(SymExpr::number(-n.clone())),
        SymExpr::Mul(factors) => {
            let idx = factors.iter()
                .position(|factor| factor.as_number().is_some_and(|n| *n < 0))?;
            let mut factors = factors.clone();
            let flipped = -factors.remove(idx);
            if !flipped.is_one() {
                factors.insert(idx, flipped);
            }
            Some(SymExpr::Mul(factors).downgrade())
        },
        _ => None,
    }
}

fn fmt_sum(f: &mut Formatter, terms: &[SymExpr]) -> fmt::Result {
    let mut terms = terms.iter().collect::<Vec<_>>();
    terms.sort_by_key(|term| (term.is_numeric(), Reverse(degree(term))));

    for (i, term) in terms.into_iter().enumerate() {
        match negated(term) {
            Some(magnitude) => {
                if i == 0 {
                    write!(f, "- ")?;
                } else {
                    write!(f, " - ")?;
                }
                magnitude.fmt_latex(f)?;
            },
            None => {
                if i > 0 {
                    write!(f, " + ")?;
                }
                term.fmt_latex(f)?;
            },
        }
    }
    Ok(())
}

fn factor_rank(factor: &SymExpr) -> u8 {
    match factor {
        SymExpr::Primary(Primary::Number(_)) => 0,
        SymExpr::Primary(Primary::Constant(Constant::Pi)) => 1,
        SymExpr::Primary(Primary::Symbol(_)) => 2,
        SymExpr::Primary(Primary::Constant(_)) => 3,
        SymExpr::Primary(Primary::Call(..)) => 4,
        _ => 5,
    }
}

/// Where a factor goes in a product: numbers first, then constants and symbols, exponentials,
/// function calls and finally sums. Powers are placed by their base.
fn factor_order(factor: &SymExpr) -> (u8, String) {
    let base = match factor {
        SymExpr::Exp(base, _) => &**base,
        factor => factor,
    };
    let rank = factor_rank(base);
    let rank = if matches!(factor, SymExpr::Exp(..)) { rank.max(1) } else { rank };
    (rank, base.as_symbol().unwrap_or_default().to_string())
}

/// Writes factors separated by spaces, or `\cdot` before a factor that starts with a digit.
fn fmt_factors(f: &mut Formatter, factors: &mut [SymExpr]) -> fmt::Result {
    factors.sort_by_key(factor_order);
    let single = factors.len() == 1;

    for (i, factor) in factors.iter().enumerate() {
        let latex = if !single && matches!(factor, SymExpr::Add(_) | SymExpr::Mul(_)) {
            format!("\\left({}\\right)", factor.as_display())
        } else {
            factor.as_display().to_string()
        };

        if i > 0 {
            if latex.starts_with(|c: char| c.is_ascii_digit()) {
                write!(f, " \\cdot ")?;
            } else {
                write!(f, " ")?;
            }
        }
        write!(f, "{}", latex)?;
    }
    Ok(())
}

/// Writes a product, moving factors with negative exponents into the denominator of a fraction.
fn fmt_product(f: &mut Formatter, factors: &[SymExpr]) -> fmt::Result {
    let mut coefficient = Rational::from(1);
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => coefficient *= n,
            SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n < 0) => {
                let positive = exp.as_number().map(|n| -n.clone()).unwrap_or_default();
                if positive == 1 {
                    denominator.push(*base.clone());
                } else {
                    denominator.push(SymExpr::pow(*base.clone(), SymExpr::number(positive)));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    if coefficient < 0 {
        write!(f, "- ")?;
        coefficient = -coefficient;
    }
    let (p, q) = coefficient.into_numer_denom();
    if p != 1 || numerator.is_empty() {
        numerator.push(SymExpr::number(Rational::from(p)));
    }
    if q != 1 {
        denominator.push(SymExpr::number(Rational::from(q)));
    }

    if denominator.is_empty() {
        fmt_factors(f, &mut numerator)
    } else {
        write!(f, "\\frac{{")?;
        fmt_factors(f, &mut numerator)?;
        write!(f, "}}{{")?;
        fmt_factors(f, &mut denominator)?;
        write!(f, "}}")
    }
}

/// Returns true if the base of a power needs parentheses.
fn needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || *n.denom() != 1,
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
    }
}

fn fmt_power(f: &mut Formatter, power: &SymExpr, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
    if let Some(n) = exp.as_number() {
        if *n < 0 {
            return fmt_product(f, std::slice::from_ref(power));
        }
        if *n.numer() == 1 && *n.denom() == 2 {
            return write!(f, "\\sqrt{{{}}}", base.as_display());
        }
        if *n.numer() == 1 && *n.denom() != 1 {
            return write!(f, "\\sqrt[{}]{{{}}}", n.denom(), base.as_display());
        }
    }

    match base {
        SymExpr::Primary(Primary::Call(name, args))
            if POWER_FUNCTIONS.contains(&name.as_str()) && args.len() == 1 => {
            write!(
                f,
                "\\{}^{{{}}}{{\\left({} \\right)}}",
                name,
                exp.as_display(),
                args[0].as_display(),
            )
        },
        base if needs_parens(base) => {
            write!(f, "\\left({}\\right)^{{{}}}", base.as_display(), exp.as_display())
        },
        base => write!(f, "{}^{{{}}}", base.as_display(), exp.as_display()),
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) => fmt_sum(f, terms),
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(base, exp) => fmt_power(f, self, base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use crate::symbolic::simplify;
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(input: &str) -> String {
        let expr = SymExpr::try_from(parse_plain(input).unwrap()).unwrap();
        simplify(&expr).as_display().to_string()
    }

    #[test]
    fn numbers() {
        assert_eq!(latex("3"), "3");
        assert_eq!(latex("-3"), "-3");
        assert_eq!(latex("3/4"), "\\frac{3}{4}");
        assert_eq!(latex("-3/4"), "- \\frac{3}{4}");
    }

    #[test]
    fn constants_and_symbols() {
        assert_eq!(latex("pi"), "\\pi");
        assert_eq!(latex("E"), "e");
        assert_eq!(latex("oo"), "\\infty");
        assert_eq!(latex("theta"), "\\theta");
        assert_eq!(latex("x_1"), "x_{1}");
    }

    #[test]
    fn products() {
        assert_eq!(latex("x*2"), "2 x");
        assert_eq!(latex("y*x"), "x y");
        assert_eq!(latex("x**2/2"), "\\frac{x^{2}}{2}");
        assert_eq!(latex("-x/2"), "- \\frac{x}{2}");
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("3/(x + 1)"), "\\frac{3}{x + 1}");
        assert_eq!(latex("2*3**x"), "2 \\cdot 3^{x}");
        assert_eq!(latex("E**x*x"), "x e^{x}");
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(latex("x**2"), "x^{2}");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("x**(1/3)"), "\\sqrt[3]{x}");
        assert_eq!(latex("x**(3/2)"), "x^{\\frac{3}{2}}");
        assert_eq!(latex("(x + 1)**2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("E**(-x)"), "e^{- x}");
        assert_eq!(latex("x**(-2)"), "\\frac{1}{x^{2}}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), "\\sin{\\left(x \\right)}");
        assert_eq!(latex("sin(x)**2"), "\\sin^{2}{\\left(x \\right)}");
        assert_eq!(latex("log(x)"), "\\log{\\left(x \\right)}");
        assert_eq!(latex("atan(x)"), "\\operatorname{atan}{\\left(x \\right)}");
        assert_eq!(latex("x*cos(2*x)"), "x \\cos{\\left(2 x \\right)}");
    }

    #[test]
    fn sums() {
        assert_eq!(latex("1 + 2*x + x**2"), "x^{2} + 2 x + 1");
        assert_eq!(latex("1 - x"), "- x + 1");
        assert_eq!(latex("x/2 - sin(2*x)/4"), "\\frac{x}{2} - \\frac{\\sin{\\left(2 x \\right)}}{4}");
    }
}
