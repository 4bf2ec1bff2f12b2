//! Executes `HttpRequest` values against the network.
//!
//! `MojoClient` only needs "POST this, give me status and body", so that is
//! all `Transport` asks for. `UreqTransport` is the default; tests and hosts
//! with their own HTTP stack plug in another implementation.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{MojoError, Result};
use crate::http::{HttpRequest, HttpResponse};

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Sends one request and returns the response as data.
///
/// Implementations must return non-2xx responses as `Ok`; status handling
/// belongs to the client. `Err` is reserved for requests that never got a
/// response, reported as `MojoError::Transport`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let wrap = |e: ureq::Error| MojoError::Transport {
            url: request.url.clone(),
            source: Box::new(e),
        };

        let mut builder = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.send(request.body.as_bytes()).map_err(wrap)?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(wrap)?;
        Ok(HttpResponse { status, body })
    }
}
