use calculus_solver::web::handle;
use pretty_assertions::assert_eq;
use tiny_http::Method;

#[test]
fn get_form() {
    let response = handle(&Method::Get, "/", "");
    assert_eq!(response.status, 200);
    assert!(response.content_type.starts_with("text/html"));
    assert!(response.body.contains("name=\"expr\""));
    assert!(response.body.contains("function fixLatex"));
    assert!(!response.body.contains("class=\"step\""));
}

#[test]
fn post_solves() {
    let response = handle(&Method::Post, "/", "expr=%5Cfrac%7Bd%7D%7Bdx%7D+x%5E2");
    assert_eq!(response.status, 200);
    assert!(response.body.contains(r#"value="\frac{d}{dx} x^2""#));
    assert!(response.body.contains(r#"<div class="step">Computing the derivative:</div>"#));
    assert!(response.body.contains(r#"<div class="step">$$ 2 x $$</div>"#));
}

#[test]
fn post_error() {
    let response = handle(&Method::Post, "/", "expr=%5Cfrac%7B1%7D%7B");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Error: Could not parse expression"));
    assert!(!response.body.contains("class=\"step\""));

    let response = handle(&Method::Post, "/", "expr=x%5E2");
    assert!(response.body.contains("Error: Unsupported expression type"));
}

#[test]
fn escapes_submitted_expression() {
    let response = handle(&Method::Post, "/", "expr=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
    assert!(!response.body.contains("<script>alert(1)</script>"));
    assert!(response.body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn not_found() {
    assert_eq!(handle(&Method::Get, "/solve", "").status, 404);
    assert_eq!(handle(&Method::Get, "/?expr=x", "").status, 200);
}

#[test]
fn method_not_allowed() {
    let response = handle(&Method::Put, "/", "");
    assert_eq!(response.status, 405);
    assert_eq!(response.headers, vec![("Allow", "GET, POST")]);
}
