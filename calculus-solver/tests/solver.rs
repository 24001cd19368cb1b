use calc_compute::{error::{DerivativeError, IntegralError}, ComputeError};
use calculus_solver::{parse_expression, solve, solve_expression, Error, ParseError, ProblemKind, SolveError};
use pretty_assertions::assert_eq;

fn steps(input: &str) -> Vec<String> {
    solve(input).unwrap().steps
}

#[test]
fn derivative() {
    let problem = parse_expression(r"\frac{d}{dx} x^2").unwrap();
    let solution = solve_expression(&problem).unwrap();
    assert_eq!(solution.kind, ProblemKind::Derivative);
    assert_eq!(solution.steps, vec![
        r"Given derivative $$\frac{d}{d x} x^{2}$$",
        "Computing the derivative:",
        "$$ 2 x $$",
    ]);
    assert!(solution.to_string().contains("2 x"));
}

#[test]
fn integral() {
    assert_eq!(steps(r"\int x dx"), vec![
        r"Given integral $$\int x\, dx$$",
        "Evaluating the integral:",
        r"$$ \frac{x^{2}}{2} $$ + C",
    ]);
}

#[test]
fn definite_integral() {
    assert_eq!(steps(r"\int_{0}^{2} x \, dx"), vec![
        r"Given integral $$\int\limits_{0}^{2} x\, dx$$",
        "Evaluating the integral:",
        "$$ 2 $$",
    ]);
}

#[test]
fn sum() {
    assert_eq!(steps(r"\sum_{n=1}^3 n"), vec![
        r"Given sum $$\sum_{n=1}^{3} n$$",
        "Evaluating the sum:",
        "$$ 6 $$",
    ]);
}

#[test]
fn higher_order_derivative() {
    assert_eq!(steps(r"\frac{d^2}{dx^2} \sin x")[2], r"$$ - \sin{\left(x \right)} $$");
}

#[test]
fn plain_notation() {
    let solution = solve("Integral(x**2, x)").unwrap();
    assert_eq!(solution.kind, ProblemKind::Integral);
    assert_eq!(solution.steps[2], r"$$ \frac{x^{3}}{3} $$ + C");

    let solution = solve("Sum(n**2, (n, 1, 10))").unwrap();
    assert_eq!(solution.steps[2], "$$ 385 $$");
}

#[test]
fn parse_failure() {
    let err = solve(r"\int_0^1 x^{2").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Syntax { .. })));
    assert_eq!(
        err.to_string(),
        "Could not parse expression as LaTeX or symbolic syntax. Check for missing braces or unsupported commands.",
    );
}

#[test]
fn unsupported_expression() {
    let problem = parse_expression("x^2 + 1").unwrap();
    let err = solve_expression(&problem).unwrap_err();
    assert_eq!(err, SolveError::Unsupported);
    assert_eq!(err.to_string(), "Unsupported expression type");
}

#[test]
fn no_closed_form() {
    let problem = parse_expression(r"\int e^{x^2} dx").unwrap();
    let err = solve_expression(&problem).unwrap_err();
    assert_eq!(err.to_string(), "no closed form found for the integral of e^{x^{2}}");
    assert!(matches!(
        err,
        SolveError::Compute(ComputeError::Integral(IntegralError::NoClosedForm(_))),
    ));
}

#[test]
fn nesting_limit() {
    let input = format!(r"\int {}x{} dx", "(".repeat(10_000), ")".repeat(10_000));
    match solve(&input).unwrap_err() {
        Error::Parse(ParseError::Syntax { latex, .. }) => {
            assert_eq!(latex.to_string(), "expression is nested too deeply");
        },
        err => panic!("unexpected error: {}", err),
    }

    let input = format!(r"\int {}x{} dx", "(".repeat(100), ")".repeat(100));
    assert_eq!(steps(&input)[2], r"$$ \frac{x^{2}}{2} $$ + C");
}

#[test]
fn undefined_results() {
    let err = solve(r"\sum_{n=1}^{3} \frac{1}{n-2}").unwrap_err();
    assert_eq!(err.to_string(), "the sum is undefined at n = 2");

    let err = solve(r"\frac{d}{dx} \frac{x}{0}").unwrap_err();
    assert!(matches!(
        err,
        Error::Solve(SolveError::Compute(ComputeError::Derivative(DerivativeError::Undefined(_)))),
    ));
}
