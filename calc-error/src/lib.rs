//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

#[cfg(test)]
extern crate self as calc_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display, Formatter}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// The one-line message describing this error, without any source annotations.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal. A fatal error stops any backtracking parser from trying other
    /// alternatives at the same position.
    pub fatal: bool,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report of this error to a string, without colors.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> String {
        let mut buf = Vec::new();
        // writing into a `Vec` cannot fail
        let _ = self.build_report(src_id).write((src_id, Source::from(input)), &mut buf);
        let report = String::from_utf8_lossy(&buf);
        report.into_owned()
    }

    /// Prints the report of this error to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne::Fmt;
    use calc_attrs::ErrorKind;

    /// Tried to divide by zero.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "cannot divide by zero",
        labels = ["this expression evaluates to zero"],
        help = format!("check the value of {}", "the denominator".fg(EXPR)),
    )]
    pub struct DivideByZero;

    /// An unknown command was used.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown command `\\{}`", name),
        labels = ["this command"],
    )]
    pub struct UnknownCommand {
        name: String,
    }

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![0..3], UnknownCommand { name: "foo".to_string() });
        assert_eq!(err.to_string(), "unknown command `\\foo`");
        assert!(!err.fatal);
    }

    #[test]
    fn report_mentions_label_and_help() {
        let err = Error::new_fatal(vec![4..5], DivideByZero);
        let report = err.report_to_string("input", "1 / 0");
        let report = String::from_utf8_lossy(&strip_ansi_escapes::strip(report)).into_owned();
        assert!(err.fatal);
        assert!(report.contains("cannot divide by zero"));
        assert!(report.contains("this expression evaluates to zero"));
        assert!(report.contains("check the value of the denominator"));
    }
}
