//! The web front-end: a single page with a form that solves the submitted expression.
//!
//! Requests are handled one at a time by [`serve`]. The routing itself is done by [`handle`],
//! which does not touch the network.

pub mod template;

use crate::solver::solve;
use template::{render, Outcome};
use thiserror::Error;
use tiny_http::{Header, Method, Server};

/// The server could not be started.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("could not listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// A response to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,

    /// Extra headers, besides the content type.
    pub headers: Vec<(&'static str, &'static str)>,

    /// The response body, an HTML page or plain text.
    pub body: String,

    /// The content type of the body.
    pub content_type: &'static str,
}

impl Response {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body,
            content_type: "text/html; charset=utf-8",
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
            content_type: "text/plain; charset=utf-8",
        }
    }
}

/// Reads the `expr` field of a urlencoded form.
fn form_expr(body: &str) -> String {
    form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "expr")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Responds to a request for the given URL, with the given body.
pub fn handle(method: &Method, url: &str, body: &str) -> Response {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    if path != "/" {
        return Response::text(404, "Not Found");
    }

    match method {
        Method::Get => Response::html(render("", None)),
        Method::Post => {
            let expr = form_expr(body);
            let outcome = match solve(&expr) {
                Ok(solution) => Outcome::Solved(solution),
                Err(err) => {
                    log::warn!("failed to solve `{}`: {}", expr, err);
                    Outcome::Failed(err.to_string())
                },
            };
            Response::html(render(&expr, Some(&outcome)))
        },
        _ => {
            let mut response = Response::text(405, "Method Not Allowed");
            response.headers.push(("Allow", "GET, POST"));
            response
        },
    }
}

/// Serves the page on the given address until the process is stopped.
pub fn serve(addr: &str) -> Result<(), WebError> {
    let server = Server::http(addr)
        .map_err(|source| WebError::Bind { addr: addr.to_string(), source })?;
    log::info!("listening on http://{}", addr);

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        if let Err(err) = request.as_reader().read_to_string(&mut body) {
            log::warn!("failed to read request body: {}", err);
            body.clear();
        }

        let response = handle(request.method(), request.url(), &body);
        log::info!("{} {} {}", request.method(), request.url(), response.status);

        let mut reply = tiny_http::Response::from_string(response.body)
            .with_status_code(response.status);
        let headers = std::iter::once(("Content-Type", response.content_type))
            .chain(response.headers);
        for (name, value) in headers {
            match Header::from_bytes(name, value) {
                Ok(header) => reply = reply.with_header(header),
                Err(()) => log::warn!("invalid header {}: {}", name, value),
            }
        }

        if let Err(err) = request.respond(reply) {
            log::warn!("failed to send response: {}", err);
        }
    }

    Ok(())
}
