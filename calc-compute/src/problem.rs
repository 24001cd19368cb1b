//! Calculus problems: integrals, derivatives and sums.
//!
//! A [`Problem`] is built from the top level of a parsed expression. It keeps the operands in
//! symbolic form, so that the problem itself can be printed as LaTeX alongside its result.

use calc_parser::ast::{self, Expr as AstExpr};
use crate::{
    error::ComputeError,
    latex::{fmt_operand, fmt_symbol, Latex},
    symbolic::{
        derivative::derivative_n,
        integral::{definite_integral_with, integral_with},
        simplify::{simplify_with, step::Step},
        step_collector::StepCollector,
        summation::sum_with,
        SymExpr,
    },
};
use std::fmt::{self, Formatter};

/// An integral, such as `\int x^2 dx` or `\int_0^1 x^2 dx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integral {
    /// The expression to integrate.
    pub integrand: SymExpr,

    /// The variable of integration.
    pub variable: String,

    /// The lower and upper bounds, if the integral is definite.
    pub bounds: Option<(SymExpr, SymExpr)>,
}

impl Integral {
    /// Returns true if the integral has bounds.
    pub fn is_definite(&self) -> bool {
        self.bounds.is_some()
    }

    /// Computes the integral. Indefinite integrals evaluate to an antiderivative, with no constant
    /// of integration.
    pub fn evaluate(&self) -> Result<SymExpr, ComputeError> {
        self.evaluate_with(&mut ())
    }

    /// Computes the integral, reporting the simplification steps to the given step collector.
    pub fn evaluate_with(&self, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, ComputeError> {
        let result = match &self.bounds {
            Some((lower, upper)) => definite_integral_with(
                &self.integrand,
                &self.variable,
                lower,
                upper,
                step_collector,
            )?,
            None => integral_with(&self.integrand, &self.variable, step_collector)?,
        };
        Ok(result)
    }
}

impl TryFrom<ast::Integral> for Integral {
    type Error = ComputeError;

    fn try_from(integral: ast::Integral) -> Result<Self, Self::Error> {
        let bounds = integral.bounds
            .map(|bounds| Ok::<_, ComputeError>((
                SymExpr::try_from(*bounds.lower)?,
                SymExpr::try_from(*bounds.upper)?,
            )))
            .transpose()?;
        Ok(Self {
            integrand: SymExpr::try_from(*integral.integrand)?,
            variable: integral.variable.name,
            bounds,
        })
    }
}

impl Latex for Integral {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match &self.bounds {
            Some((lower, upper)) => write!(
                f,
                "\\int\\limits_{{{}}}^{{{}}} ",
                lower.as_display(),
                upper.as_display(),
            )?,
            None => write!(f, "\\int ")?,
        }
        fmt_operand(f, &self.integrand)?;
        write!(f, "\\, d")?;
        fmt_symbol(f, &self.variable)
    }
}

/// A derivative, such as `\frac{d}{dx} x^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivative {
    /// The expression to differentiate.
    pub expr: SymExpr,

    /// The variable to differentiate with respect to.
    pub variable: String,

    /// How many times to differentiate.
    pub order: u32,
}

impl Derivative {
    /// Computes the derivative.
    pub fn evaluate(&self) -> Result<SymExpr, ComputeError> {
        self.evaluate_with(&mut ())
    }

    /// Computes the derivative, reporting the simplification steps to the given step collector.
    pub fn evaluate_with(&self, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, ComputeError> {
        Ok(derivative_n(&self.expr, &self.variable, self.order, step_collector)?)
    }
}

impl TryFrom<ast::Derivative> for Derivative {
    type Error = ComputeError;

    fn try_from(derivative: ast::Derivative) -> Result<Self, Self::Error> {
        Ok(Self {
            expr: SymExpr::try_from(*derivative.expr)?,
            variable: derivative.variable.name,
            order: derivative.order,
        })
    }
}

impl Latex for Derivative {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        if self.order == 1 {
            write!(f, "\\frac{{d}}{{d ")?;
            fmt_symbol(f, &self.variable)?;
            write!(f, "}} ")?;
        } else {
            write!(f, "\\frac{{d^{{{}}}}}{{d ", self.order)?;
            fmt_symbol(f, &self.variable)?;
            write!(f, "^{{{}}}}} ", self.order)?;
        }
        fmt_operand(f, &self.expr)
    }
}

/// A sum over an integer index, such as `\sum_{n=1}^{10} n^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sum {
    /// The expression summed for each value of the index.
    pub summand: SymExpr,

    /// The index variable.
    pub variable: String,

    /// The first value of the index.
    pub lower: SymExpr,

    /// The last value of the index, inclusive.
    pub upper: SymExpr,
}

impl Sum {
    /// Computes the sum.
    pub fn evaluate(&self) -> Result<SymExpr, ComputeError> {
        self.evaluate_with(&mut ())
    }

    /// Computes the sum, reporting the simplification steps to the given step collector.
    pub fn evaluate_with(&self, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, ComputeError> {
        Ok(sum_with(&self.summand, &self.variable, &self.lower, &self.upper, step_collector)?)
    }
}

impl TryFrom<ast::Sum> for Sum {
    type Error = ComputeError;

    fn try_from(sum: ast::Sum) -> Result<Self, Self::Error> {
        Ok(Self {
            summand: SymExpr::try_from(*sum.summand)?,
            variable: sum.variable.name,
            lower: SymExpr::try_from(*sum.bounds.lower)?,
            upper: SymExpr::try_from(*sum.bounds.upper)?,
        })
    }
}

impl Latex for Sum {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "\\sum_{{")?;
        fmt_symbol(f, &self.variable)?;
        write!(f, "={}}}^{{{}}} ", self.lower.as_display(), self.upper.as_display())?;
        fmt_operand(f, &self.summand)
    }
}

/// The top-level category of a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// An integral.
    Integral(Integral),

    /// A derivative.
    Derivative(Derivative),

    /// A sum.
    Sum(Sum),

    /// Any other expression. Calculus operations nested inside it have already been computed.
    Expression(SymExpr),
}

impl Problem {
    /// Computes the result of the problem. Plain expressions are simplified.
    pub fn evaluate(&self) -> Result<SymExpr, ComputeError> {
        self.evaluate_with(&mut ())
    }

    /// Computes the result of the problem, reporting the simplification steps to the given step
    /// collector.
    pub fn evaluate_with(&self, step_collector: &mut dyn StepCollector<Step>) -> Result<SymExpr, ComputeError> {
        match self {
            Self::Integral(integral) => integral.evaluate_with(step_collector),
            Self::Derivative(derivative) => derivative.evaluate_with(step_collector),
            Self::Sum(sum) => sum.evaluate_with(step_collector),
            Self::Expression(expr) => Ok(simplify_with(expr, step_collector)),
        }
    }
}

impl TryFrom<AstExpr> for Problem {
    type Error = ComputeError;

    /// Classifies the expression by its outermost operation, ignoring enclosing parentheses.
    fn try_from(mut expr: AstExpr) -> Result<Self, Self::Error> {
        while let AstExpr::Paren(paren) = expr {
            expr = *paren.expr;
        }

        Ok(match expr {
            AstExpr::Integral(integral) => Self::Integral(integral.try_into()?),
            AstExpr::Derivative(derivative) => Self::Derivative(derivative.try_into()?),
            AstExpr::Sum(sum) => Self::Sum(sum.try_into()?),
            expr => Self::Expression(expr.try_into()?),
        })
    }
}

impl Latex for Problem {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Integral(integral) => integral.fmt_latex(f),
            Self::Derivative(derivative) => derivative.fmt_latex(f),
            Self::Sum(sum) => sum.fmt_latex(f),
            Self::Expression(expr) => expr.fmt_latex(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::{parse_latex, parse_plain};
    use crate::error::{IntegralError, SumError};
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex_problem(input: &str) -> Problem {
        Problem::try_from(parse_latex(input).unwrap()).unwrap()
    }

    fn solve(problem: &Problem) -> String {
        problem.evaluate().unwrap().as_display().to_string()
    }

    #[test]
    fn classify() {
        assert!(matches!(latex_problem(r"\int x\,dx"), Problem::Integral(_)));
        assert!(matches!(latex_problem(r"\frac{d}{dx} x^2"), Problem::Derivative(_)));
        assert!(matches!(latex_problem(r"\sum_{n=1}^{3} n"), Problem::Sum(_)));
        assert!(matches!(latex_problem(r"(\int x\,dx)"), Problem::Integral(_)));
        assert!(matches!(latex_problem(r"x^2 + 1"), Problem::Expression(_)));
        assert!(matches!(latex_problem(r"2 \int x\,dx"), Problem::Expression(_)));
    }

    #[test]
    fn print_problems() {
        assert_eq!(latex_problem(r"\int x\,dx").as_display().to_string(), r"\int x\, dx");
        assert_eq!(
            latex_problem(r"\int_0^1 x\,dx").as_display().to_string(),
            r"\int\limits_{0}^{1} x\, dx",
        );
        assert_eq!(
            latex_problem(r"\int (x + 1)\,dx").as_display().to_string(),
            r"\int \left(x + 1\right)\, dx",
        );
        assert_eq!(
            latex_problem(r"\frac{d}{dx} x^2").as_display().to_string(),
            r"\frac{d}{d x} x^{2}",
        );
        assert_eq!(
            latex_problem(r"\frac{d^2}{dx^2} x^3").as_display().to_string(),
            r"\frac{d^{2}}{d x^{2}} x^{3}",
        );
        assert_eq!(
            latex_problem(r"\sum_{n=1}^{3} n").as_display().to_string(),
            r"\sum_{n=1}^{3} n",
        );
    }

    #[test]
    fn evaluate_problems() {
        assert_eq!(solve(&latex_problem(r"\int x\,dx")), r"\frac{x^{2}}{2}");
        assert_eq!(solve(&latex_problem(r"\int_0^1 x\,dx")), r"\frac{1}{2}");
        assert_eq!(solve(&latex_problem(r"\frac{d}{dx} x^2")), "2 x");
        assert_eq!(solve(&latex_problem(r"\frac{d^2}{dx^2} x^3")), "6 x");
        assert_eq!(solve(&latex_problem(r"\sum_{n=1}^{3} n")), "6");
    }

    #[test]
    fn plain_notation() {
        let problem = Problem::try_from(parse_plain("Integral(x, (x, 0, 2))").unwrap()).unwrap();
        assert_eq!(solve(&problem), "2");

        let problem = Problem::try_from(parse_plain("Derivative(sin(x), x)").unwrap()).unwrap();
        assert_eq!(solve(&problem), r"\cos{\left(x \right)}");
    }

    #[test]
    fn errors() {
        assert_eq!(
            latex_problem(r"\int_0^\infty x\,dx").evaluate(),
            Err(ComputeError::Integral(IntegralError::InfiniteBounds)),
        );
        assert_eq!(
            latex_problem(r"\sum_{n=1}^{\infty} n").evaluate(),
            Err(ComputeError::Sum(SumError::Diverges)),
        );
    }

    #[test]
    fn records_steps() {
        let mut steps = Vec::new();
        latex_problem(r"\frac{d}{dx} (x^2 + 0)").evaluate_with(&mut steps).unwrap();
        assert!(!steps.is_empty());
    }
}
