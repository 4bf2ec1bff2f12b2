//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `MojoClient` builds `HttpRequest`
//! values and parses `HttpResponse` values; a `Transport` (or the caller)
//! performs the actual round-trip. Every Mojo endpoint is a JSON POST, so a
//! request is just a URL, headers and a body.

/// A POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// JSON POST to `url` authorized with `token`.
    pub(crate) fn json_post(url: String, token: &str, body: String) -> Self {
        Self {
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), format!("Bearer {token}")),
            ],
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Diagnostic copy of the request without its credentials.
    pub fn context(&self) -> RequestContext {
        RequestContext {
            url: self.url.clone(),
            body: self.body.clone(),
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// URL and body of a rejected request, attached to validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub url: String,
    pub body: String,
}
