//! Error types for the Mojo client.
//!
//! # Design
//! Mojo answers most outcomes with HTTP 200 and a JSON envelope, so the
//! variants here follow the meaning of the response rather than its status
//! code. `Duplicate`, `Invalid`, `Forbidden` and `Locked` each get a variant
//! because callers react to them differently. Anything else the server sends
//! lands in `Status` with the raw code and body for debugging.

use thiserror::Error;

use crate::http::RequestContext;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, MojoError>;

/// Errors returned by `MojoClient` operations.
#[derive(Debug, Error)]
pub enum MojoError {
    /// A contact is missing a field Mojo requires (`ID` or `GroupID`).
    #[error("mojo: missing required field {0}")]
    MissingField(&'static str),

    /// The request payload could not be rendered as JSON.
    #[error("mojo: encoding body ({0})")]
    Encoding(String),

    /// The client configuration is unusable.
    #[error("mojo: invalid configuration ({0})")]
    Config(String),

    /// The request never produced a response (connection, DNS, timeout).
    #[error("mojo: making request to {url} ({source})")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server returned a status other than 200, 400 or 403.
    #[error("mojo: invalid status code {status} with body {body}")]
    Status { status: u16, body: String },

    /// The server returned 403, usually an invalid access token.
    #[error("mojo: {message}")]
    Forbidden { message: String },

    /// One or more contacts already exist in Mojo.
    #[error("mojo: contacts already exist {}", ids.join(","))]
    Duplicate { ids: Vec<String> },

    /// Mojo rejected the payload. `request` is set when the rejection came
    /// with enough context to replay the call (400 responses, notes).
    #[error("mojo: {message}")]
    Invalid {
        message: String,
        request: Option<RequestContext>,
    },

    /// A previous bulk request for the account is still running.
    #[error("mojo: {message}")]
    Locked { message: String },

    /// The response body is not valid JSON.
    #[error("mojo: decoding response body ({0})")]
    Decode(#[source] serde_json::Error),
}

impl MojoError {
    /// True when Mojo refused the call because another bulk request is in
    /// flight. The same payload can be sent again later.
    pub fn is_locked(&self) -> bool {
        matches!(self, MojoError::Locked { .. })
    }

    /// The identities Mojo reported as already existing, if any.
    pub fn duplicate_ids(&self) -> Option<&[String]> {
        match self {
            MojoError::Duplicate { ids } => Some(ids),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_lists_ids() {
        let err = MojoError::Duplicate {
            ids: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "mojo: contacts already exist a,b");
        assert_eq!(err.duplicate_ids().unwrap(), ["a", "b"]);
    }

    #[test]
    fn status_message_includes_body() {
        let err = MojoError::Status {
            status: 500,
            body: "opssss".to_string(),
        };
        assert_eq!(err.to_string(), "mojo: invalid status code 500 with body opssss");
        assert!(err.duplicate_ids().is_none());
    }

    #[test]
    fn transport_message_names_url_and_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = MojoError::Transport {
            url: "https://example.test/api/notes/".to_string(),
            source: Box::new(cause),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.test/api/notes/"));
        assert!(msg.contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn only_locked_is_locked() {
        let locked = MojoError::Locked {
            message: "busy".to_string(),
        };
        let forbidden = MojoError::Forbidden {
            message: "busy".to_string(),
        };
        assert!(locked.is_locked());
        assert!(!forbidden.is_locked());
    }
}
