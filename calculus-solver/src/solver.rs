//! Parsing inputs into problems, and describing their solutions.

use calc_compute::{symbolic::simplify::step::Step, Latex, Problem, SymExpr};
use calc_parser::{parse_latex, parse_plain};
use crate::error::{Error, ParseError, SolveError};
use std::fmt;

/// Parses the input as LaTeX, falling back to the plain symbolic notation if that fails.
pub fn parse_expression(input: &str) -> Result<Problem, ParseError> {
    let ast = match parse_latex(input) {
        Ok(ast) => ast,
        Err(latex) => {
            log::debug!("could not parse `{}` as LaTeX, trying plain notation: {}", input, latex);
            parse_plain(input).map_err(|plain| ParseError::Syntax { latex, plain })?
        },
    };
    Ok(Problem::try_from(ast)?)
}

/// The kind of problem that was solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Integral,
    Derivative,
    Sum,
}

/// The lines describing how a problem was solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The kind of problem.
    pub kind: ProblemKind,

    /// The steps of the solution, one line each.
    pub steps: Vec<String>,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.steps.join("\n"))
    }
}

/// Formats a result as display math.
fn display_math(result: &SymExpr) -> String {
    format!("$$ {} $$", result.as_display())
}

/// Computes the problem and describes the solution. Only integrals, derivatives and sums are
/// supported.
pub fn solve_expression(problem: &Problem) -> Result<Solution, SolveError> {
    let mut simplification: Vec<Step> = Vec::new();
    let solution = match problem {
        Problem::Integral(integral) => {
            let result = integral.evaluate_with(&mut simplification)?;
            let mut last = display_math(&result);
            if !integral.is_definite() {
                last.push_str(" + C");
            }
            Solution {
                kind: ProblemKind::Integral,
                steps: vec![
                    format!("Given integral $${}$$", integral.as_display()),
                    "Evaluating the integral:".to_string(),
                    last,
                ],
            }
        },
        Problem::Derivative(derivative) => {
            let result = derivative.evaluate_with(&mut simplification)?;
            Solution {
                kind: ProblemKind::Derivative,
                steps: vec![
                    format!("Given derivative $${}$$", derivative.as_display()),
                    "Computing the derivative:".to_string(),
                    display_math(&result),
                ],
            }
        },
        Problem::Sum(sum) => {
            let result = sum.evaluate_with(&mut simplification)?;
            Solution {
                kind: ProblemKind::Sum,
                steps: vec![
                    format!("Given sum $${}$$", sum.as_display()),
                    "Evaluating the sum:".to_string(),
                    display_math(&result),
                ],
            }
        },
        Problem::Expression(expr) => {
            log::debug!("`{}` is not an integral, derivative or sum", expr);
            return Err(SolveError::Unsupported);
        },
    };

    log::debug!(
        "solved {:?} problem with {} simplification steps",
        solution.kind,
        simplification.len(),
    );
    Ok(solution)
}

/// Parses and solves the input.
pub fn solve(input: &str) -> Result<Solution, Error> {
    let problem = parse_expression(input)?;
    Ok(solve_expression(&problem)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn latex_first() {
        assert!(matches!(parse_expression(r"\int x dx"), Ok(Problem::Integral(_))));
        assert!(matches!(parse_expression(r"\frac{d}{dx} x^2"), Ok(Problem::Derivative(_))));
        assert!(matches!(parse_expression(r"\sum_{n=1}^3 n"), Ok(Problem::Sum(_))));
    }

    #[test]
    fn plain_fallback() {
        assert!(matches!(parse_expression("Integral(x**2, x)"), Ok(Problem::Integral(_))));
        assert!(matches!(parse_expression("Derivative(sin(x), x)"), Ok(Problem::Derivative(_))));
        assert!(matches!(parse_expression("Sum(n, (n, 1, 3))"), Ok(Problem::Sum(_))));
    }

    #[test]
    fn neither_notation() {
        let err = parse_expression(r"\frac{1}{").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(
            err.to_string(),
            "Could not parse expression as LaTeX or symbolic syntax. Check for missing braces or unsupported commands.",
        );
    }

    #[test]
    fn display_joins_lines() {
        let solution = Solution {
            kind: ProblemKind::Sum,
            steps: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(solution.to_string(), "a\nb");
    }

    #[test]
    fn constant_of_integration() {
        let indefinite = solve(r"\int x dx").unwrap();
        assert_eq!(indefinite.steps[2], r"$$ \frac{x^{2}}{2} $$ + C");

        let definite = solve(r"\int_0^1 x^2 dx").unwrap();
        assert_eq!(definite.steps[2], r"$$ \frac{1}{3} $$");
    }
}
