//! Client configuration.
//!
//! Each Mojo account lives on its own host (for example
//! `https://posttest.mojosells.com`) and is reached with an OAuth access
//! token obtained out of band.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MojoError, Result};

fn default_timeout_secs() -> u64 {
    3
}

/// Settings needed to build a `MojoClient`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Account host, with or without scheme. `https://` is assumed.
    pub base_url: String,

    /// OAuth access token sent as a bearer token.
    pub token: String,

    /// Request timeout for the default transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(MojoError::Config("base_url cannot be empty".to_string()));
        }
        if self.token.is_empty() {
            return Err(MojoError::Config("token cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(MojoError::Config("timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<REDACTED>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Prefix `https://` when the host has no scheme and drop trailing slashes.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_to_three_seconds() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"posttest.mojosells.com","token":"abc"}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_values() {
        assert!(ClientConfig::new("", "t").validate().is_err());
        assert!(ClientConfig::new("h", "").validate().is_err());
        let mut config = ClientConfig::new("h", "t");
        config.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MojoError::Config(_)));
    }

    #[test]
    fn debug_hides_token() {
        let config = ClientConfig::new("h", "5cf3edd8ccc78ea750abdcb9367fb072");
        assert!(!format!("{config:?}").contains("5cf3edd8"));
    }

    #[test]
    fn scheme_is_added_when_missing() {
        assert_eq!(normalize_base_url("posttest.mojosells.com"), "https://posttest.mojosells.com");
        assert_eq!(normalize_base_url("http://localhost:3000/"), "http://localhost:3000");
        assert_eq!(normalize_base_url("https://a.mojosells.com"), "https://a.mojosells.com");
    }
}
