use calculus_solver::{logging, parse_expression, solve_expression};
use clap::Parser;
use log::LevelFilter;
use std::io::{self, Write};

/// Solves integrals, derivatives and sums written in LaTeX or plain notation, and explains the
/// solution step by step.
#[derive(Debug, Parser)]
#[command(name = "calculus-solver", version)]
struct Args {
    /// The expression to solve, such as `\int x dx`.
    expr: Option<String>,

    /// Print the diagnostics of both parsers to stderr if the expression cannot be parsed.
    #[arg(long)]
    diagnostics: bool,

    /// Minimum level of log messages written to stderr.
    #[arg(long, env = "CALCULUS_SOLVER_LOG", default_value = "warn", value_parser = logging::parse_level)]
    log_level: LevelFilter,
}

/// Solves the input, writing the solution or the reason it could not be solved to `out`.
fn run(input: Option<&str>, diagnostics: bool, out: &mut impl Write) -> io::Result<()> {
    let Some(input) = input else {
        return writeln!(out, "Usage: calculus-solver \"<latex expression>\"");
    };

    let problem = match parse_expression(input) {
        Ok(problem) => problem,
        Err(err) => {
            if diagnostics {
                if let Err(io_err) = err.report_to_stderr(input) {
                    log::warn!("failed to print diagnostics: {}", io_err);
                }
            }
            return writeln!(out, "Error: {}", err);
        },
    };

    match solve_expression(&problem) {
        Ok(solution) => writeln!(out, "{}", solution),
        Err(err) => writeln!(out, "Failed to solve expression: {}", err),
    }
}

fn main() {
    let args = Args::parse();
    logging::init(args.log_level);

    let mut stdout = io::stdout().lock();
    if let Err(err) = run(args.expr.as_deref(), args.diagnostics, &mut stdout) {
        log::error!("failed to write to stdout: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn output(input: Option<&str>) -> String {
        let mut out = Vec::new();
        run(input, false, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn usage() {
        assert_eq!(output(None), "Usage: calculus-solver \"<latex expression>\"\n");
    }

    #[test]
    fn solution() {
        assert_eq!(
            output(Some(r"\int x dx")),
            "Given integral $$\\int x\\, dx$$\nEvaluating the integral:\n$$ \\frac{x^{2}}{2} $$ + C\n",
        );
    }

    #[test]
    fn parse_error() {
        assert_eq!(
            output(Some(r"\frac{1}{")),
            "Error: Could not parse expression as LaTeX or symbolic syntax. Check for missing braces or unsupported commands.\n",
        );
    }

    #[test]
    fn unsupported() {
        assert_eq!(output(Some("x^2 + 1")), "Failed to solve expression: Unsupported expression type\n");
    }

    #[test]
    fn arguments() {
        let args = Args::try_parse_from(["calculus-solver", "--diagnostics", r"\int x dx"]).unwrap();
        assert_eq!(args.expr.as_deref(), Some(r"\int x dx"));
        assert!(args.diagnostics);

        let args = Args::try_parse_from(["calculus-solver"]).unwrap();
        assert_eq!(args.expr, None);
        assert!(!args.diagnostics);
    }
}
