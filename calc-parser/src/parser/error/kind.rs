use ariadne::Fmt;
use calc_attrs::ErrorKind;
use calc_error::EXPR;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = [format!("expected {} here", expected)],
)]
pub struct UnexpectedToken {
    /// A description of what was expected, such as "an expression" or "`}`".
    pub expected: &'static str,

    /// The lexeme that was found.
    pub found: String,
}

/// A LaTeX command that the parser does not know.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `\\{}`", name),
    labels = ["this command is not supported"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean {}?", format!("\\{}", suggestion).fg(EXPR)),
        None => "only common calculus commands like `\\frac`, `\\int` and `\\sin` are supported".to_string(),
    },
)]
pub struct UnknownCommand {
    /// The name of the command, without the leading backslash.
    pub name: String,

    /// A known command with a similar name.
    pub suggestion: Option<&'static str>,
}

/// A group was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed group",
    labels = ["this group is never closed"],
    help = format!("add a closing {} somewhere after this", closer.fg(EXPR)),
)]
pub struct UnclosedGroup {
    /// The token that closes the group.
    pub closer: &'static str,
}

/// An integral without a differential such as `dx`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing differential in integral",
    labels = ["this integral does not say which variable to integrate over"],
    help = format!("end the integrand with a differential, such as {}", "dx".fg(EXPR)),
)]
pub struct MissingDifferential;

/// An integral with only one of its two bounds.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "integral has only one bound",
    labels = ["this integral"],
    help = format!("give both bounds, like {}, or none", "\\int_{0}^{1}".fg(EXPR)),
)]
pub struct IncompleteBounds;

/// A sum without an index or upper bound.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "sum is missing its bounds",
    labels = ["this sum"],
    help = format!("write the index and both bounds, like {}", "\\sum_{n=1}^{10}".fg(EXPR)),
)]
pub struct MissingSumBounds;

/// The orders in the numerator and denominator of a derivative operator differ.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "mismatched derivative order",
    labels = [format!("the numerator has order {}, but the denominator has order {}", numerator, denominator)],
    help = format!("write both orders the same way, like {}", "\\frac{d^2}{dx^2}".fg(EXPR)),
)]
pub struct DerivativeOrderMismatch {
    /// The order written in the numerator.
    pub numerator: u32,

    /// The order written in the denominator.
    pub denominator: u32,
}

/// The order of a derivative is not a positive integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid derivative order",
    labels = ["the order of a derivative must be a positive integer"],
)]
pub struct InvalidDerivativeOrder;

/// A calculus call in plain notation was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} arguments, but {} were given", name, expected, given),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the calculus call.
    pub name: String,

    /// A description of the accepted argument counts.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,
}

/// A limit of a calculus call in plain notation has the wrong shape.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid limit",
    labels = [format!("expected {} here", expected)],
)]
pub struct InvalidLimit {
    /// A description of the accepted limit shapes.
    pub expected: &'static str,
}

/// A tuple was written somewhere it has no meaning.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected tuple",
    labels = ["this tuple"],
    help = format!("tuples are only allowed as limits of {}, {} and {}", "Integral".fg(EXPR), "Derivative".fg(EXPR), "Sum".fg(EXPR)),
)]
pub struct UnexpectedTuple;

/// Groups, signs or functions were nested past the depth the parser supports.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("nesting goes past {} levels here", limit)],
    help = "simplify the expression by removing redundant groups or signs",
)]
pub struct NestedTooDeeply {
    /// The deepest nesting the parser accepts.
    pub limit: usize,
}
