//! Univariate polynomials with rational coefficients.

use crate::symbolic::{
    expand::expand,
    expr::{Primary, SymExpr},
    simplify::simplify,
};
use rug::Rational;

/// Polynomials of higher degree are not recognized.
const MAX_DEGREE: usize = 64;

/// A polynomial in a single variable, stored as its coefficients in increasing order of degree.
///
/// The leading coefficient is never zero, so the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Rational>,
}

impl Polynomial {
    /// Creates a polynomial from its coefficients, lowest degree first.
    pub fn new(mut coefficients: Vec<Rational>) -> Self {
        while coefficients.last().is_some_and(|c| *c == 0) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// Recognizes the expression as a polynomial in the given variable, expanding it first.
    ///
    /// Returns [`None`] if any term is not a rational multiple of a non-negative integer power of
    /// the variable.
    pub fn from_expr(expr: &SymExpr, var: &str) -> Option<Self> {
        let expanded = expand(expr);
        let terms = match &expanded {
            SymExpr::Add(terms) => terms.as_slice(),
            expr => std::slice::from_ref(expr),
        };

        let mut coefficients = Vec::new();
        for term in terms {
            let (coefficient, degree) = monomial(term, var)?;
            if degree > MAX_DEGREE {
                return None;
            }
            if coefficients.len() <= degree {
                coefficients.resize(degree + 1, Rational::new());
            }
            coefficients[degree] += coefficient;
        }
        Some(Self::new(coefficients))
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Returns the coefficient of the term with the given degree.
    pub fn coefficient(&self, degree: usize) -> Rational {
        self.coefficients.get(degree)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the coefficients, lowest degree first.
    pub fn coefficients(&self) -> &[Rational] {
        &self.coefficients
    }

    /// Converts the polynomial back into an expression in the given variable.
    pub fn to_expr(&self, var: &str) -> SymExpr {
        let mut sum = SymExpr::Add(Vec::new());
        for (degree, coefficient) in self.coefficients.iter().enumerate() {
            if *coefficient == 0 {
                continue;
            }
            let power = match degree {
                0 => SymExpr::integer(1),
                1 => SymExpr::symbol(var),
                _ => SymExpr::pow(SymExpr::symbol(var), SymExpr::integer(degree as i64)),
            };
            sum += SymExpr::number(coefficient.clone()) * power;
        }
        simplify(&sum.downgrade())
    }

    /// Divides this polynomial by another, returning the quotient and remainder. Returns [`None`]
    /// if the divisor is zero.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let leading = divisor.coefficients.last()?;
        let mut remainder = self.coefficients.clone();
        if remainder.len() < divisor.coefficients.len() {
            return Some((Self::new(Vec::new()), self.clone()));
        }

        let mut quotient = vec![Rational::new(); remainder.len() - divisor.coefficients.len() + 1];
        for shift in (0..quotient.len()).rev() {
            let top = shift + divisor.degree();
            let factor = Rational::from(&remainder[top] / leading);
            if factor == 0 {
                continue;
            }
            for (i, c) in divisor.coefficients.iter().enumerate() {
                remainder[shift + i] -= Rational::from(&factor * c);
            }
            quotient[shift] = factor;
        }
        Some((Self::new(quotient), Self::new(remainder)))
    }
}

/// Splits a single term into its rational coefficient and its degree in the given variable.
fn monomial(term: &SymExpr, var: &str) -> Option<(Rational, usize)> {
    let factors = match term {
        SymExpr::Mul(factors) => factors.as_slice(),
        term => std::slice::from_ref(term),
    };

    let mut coefficient = Rational::from(1);
    let mut degree = 0;
    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => coefficient *= n,
            SymExpr::Primary(Primary::Symbol(sym)) if sym == var => degree += 1,
            SymExpr::Exp(base, exp) if base.as_symbol() == Some(var) => {
                let exp = exp.as_number()
                    .filter(|n| *n.denom() == 1 && **n > 0)?;
                degree += exp.numer().to_usize()?;
            },
            _ => return None,
        }
    }
    Some((coefficient, degree))
}

#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        SymExpr::try_from(parse_plain(input).unwrap()).unwrap()
    }

    fn poly(coefficients: &[i64]) -> Polynomial {
        Polynomial::new(coefficients.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn recognize_polynomial() {
        let p = Polynomial::from_expr(&parse("(x + 1)**2 - 3*x**3/2"), "x").unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coefficient(0), Rational::from(1));
        assert_eq!(p.coefficient(1), Rational::from(2));
        assert_eq!(p.coefficient(2), Rational::from(1));
        assert_eq!(p.coefficient(3), Rational::from((-3, 2)));
    }

    #[test]
    fn reject_non_polynomials() {
        assert_eq!(Polynomial::from_expr(&parse("x**(1/2)"), "x"), None);
        assert_eq!(Polynomial::from_expr(&parse("1/x"), "x"), None);
        assert_eq!(Polynomial::from_expr(&parse("sin(x) + 1"), "x"), None);
        assert_eq!(Polynomial::from_expr(&parse("a*x"), "x"), None);
    }

    #[test]
    fn long_division() {
        // x^2 + 3x + 5 = (x + 1)(x + 2) + 3
        let (quotient, remainder) = poly(&[5, 3, 1]).div_rem(&poly(&[1, 1])).unwrap();
        assert_eq!(quotient, poly(&[2, 1]));
        assert_eq!(remainder, poly(&[3]));
    }

    #[test]
    fn division_by_larger_degree() {
        let (quotient, remainder) = poly(&[1]).div_rem(&poly(&[0, 1])).unwrap();
        assert!(quotient.is_zero());
        assert_eq!(remainder, poly(&[1]));
    }

    #[test]
    fn back_to_expression() {
        assert_eq!(poly(&[1, 0, 3]).to_expr("t"), parse("3*t**2 + 1"));
    }
}
