//! The HTML page of the web front-end.

use crate::solver::Solution;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// The page, with `{{ expr }}` and `{{ solution }}` placeholders.
const PAGE: &str = include_str!("../../templates/index.html");

/// What to show below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The expression was solved.
    Solved(Solution),

    /// The expression could not be parsed or solved.
    Failed(String),
}

/// Writes the solution section of the page.
fn write_outcome(page: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Solved(solution) => {
            page.push_str("<div id=\"solution\">\n");
            for step in &solution.steps {
                page.push_str("            <div class=\"step\">");
                page.push_str(&encode_text(step));
                page.push_str("</div>\n");
            }
            page.push_str("        </div>");
        },
        Outcome::Failed(message) => {
            page.push_str("<div id=\"solution\"><p class=\"error\">Error: ");
            page.push_str(&encode_text(message));
            page.push_str("</p></div>");
        },
    }
}

/// Renders the page with the given expression in the input field, and the outcome of solving it,
/// if it was submitted.
pub fn render(expr: &str, outcome: Option<&Outcome>) -> String {
    let mut page = String::with_capacity(PAGE.len() + 512);
    let mut rest = PAGE;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start..].find("}}") else {
            break;
        };
        let end = start + len + 2;
        page.push_str(&rest[..start]);

        match rest[start + 2..end - 2].trim() {
            "expr" => page.push_str(&encode_double_quoted_attribute(expr)),
            "solution" => if let Some(outcome) = outcome {
                write_outcome(&mut page, outcome);
            },
            _ => page.push_str(&rest[start..end]),
        }
        rest = &rest[end..];
    }

    page.push_str(rest);
    page
}

#[cfg(test)]
mod tests {
    use crate::solver::ProblemKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_form() {
        let page = render("", None);
        assert!(page.contains("value=\"\""));
        assert!(!page.contains("{{"));
        assert!(!page.contains("id=\"solution\""));
    }

    #[test]
    fn steps() {
        let solution = Solution {
            kind: ProblemKind::Sum,
            steps: vec!["Given sum".to_string(), "$$ 6 $$".to_string()],
        };
        let page = render("x", Some(&Outcome::Solved(solution)));
        assert_eq!(page.matches("<div class=\"step\">").count(), 2);
        assert!(page.contains("<div class=\"step\">$$ 6 $$</div>"));
    }

    #[test]
    fn escapes_input() {
        let page = render("\"><b>x</b>", Some(&Outcome::Failed("<i>bad</i>".to_string())));
        assert!(page.contains("value=\"&quot;&gt;&lt;b&gt;x&lt;/b&gt;\""));
        assert!(page.contains("Error: &lt;i&gt;bad&lt;/i&gt;"));
        assert!(!page.contains("<b>x</b>"));
    }
}
