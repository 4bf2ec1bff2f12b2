//! Mojo API client.
//!
//! # Design
//! `MojoClient` holds the account URL, the access token and a shared
//! `Transport`; it carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes the `HttpResponse`, so hosts can run the
//! I/O themselves. `add_contacts` and `add_note` chain the two through the
//! configured transport.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::classify::{check_note_body, classify_body, forbidden};
use crate::config::{normalize_base_url, ClientConfig};
use crate::encode::{contacts_body, note_body};
use crate::error::{MojoError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport, DEFAULT_TIMEOUT};
use crate::types::{Contact, CreatedContact};

const BULK_CREATE_PATH: &str = "/api/contacts/bulk_create/";
const NOTES_PATH: &str = "/api/notes/";

/// Client for one Mojo account.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct MojoClient {
    base_url: String,
    token: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for MojoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MojoClient")
            .field("base_url", &self.base_url)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl MojoClient {
    /// Client using `UreqTransport` with the default 3 second timeout.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self::builder(base_url, token).build()
    }

    pub fn builder(base_url: &str, token: &str) -> MojoClientBuilder {
        MojoClientBuilder {
            base_url: normalize_base_url(base_url),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
            transport: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::builder(&config.base_url, &config.token)
            .timeout(config.timeout())
            .build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create contacts in Mojo, all in one request.
    ///
    /// Returns the records Mojo created. Fails with `MojoError::Duplicate`
    /// when any contact id already exists and with `MojoError::Locked` when
    /// a previous bulk request for the account is still running.
    pub fn add_contacts(&self, contacts: &[Contact]) -> Result<Vec<CreatedContact>> {
        let request = self.build_add_contacts(contacts)?;
        debug!(url = %request.url, contacts = contacts.len(), "submitting contacts");
        let response = self.transport.execute(&request)?;
        let result = self.parse_add_contacts(&request, response);
        match &result {
            Ok(created) => info!(created = created.len(), "contacts created"),
            Err(MojoError::Duplicate { ids }) => warn!(?ids, "contacts already exist"),
            Err(err) if err.is_locked() => warn!("previous bulk request still running"),
            Err(_) => {}
        }
        result
    }

    pub fn add_contact(&self, contact: &Contact) -> Result<Vec<CreatedContact>> {
        self.add_contacts(std::slice::from_ref(contact))
    }

    /// Append a note to an existing contact.
    pub fn add_note(&self, api_contact_id: &str, contents: &str) -> Result<()> {
        let request = self.build_add_note(api_contact_id, contents)?;
        debug!(url = %request.url, api_contact_id, "submitting note");
        let response = self.transport.execute(&request)?;
        self.parse_add_note(&request, response)
    }

    pub fn build_add_contacts(&self, contacts: &[Contact]) -> Result<HttpRequest> {
        let body = contacts_body(contacts)?;
        Ok(HttpRequest::json_post(self.url(BULK_CREATE_PATH), &self.token, body))
    }

    pub fn parse_add_contacts(&self, request: &HttpRequest, response: HttpResponse) -> Result<Vec<CreatedContact>> {
        check_status(request, &response)?;
        classify_body(&response.body)?.into_result()
    }

    pub fn build_add_note(&self, api_contact_id: &str, contents: &str) -> Result<HttpRequest> {
        let body = note_body(api_contact_id, contents)?;
        Ok(HttpRequest::json_post(self.url(NOTES_PATH), &self.token, body))
    }

    pub fn parse_add_note(&self, request: &HttpRequest, response: HttpResponse) -> Result<()> {
        check_status(request, &response)?;
        check_note_body(request, &response.body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Builder for `MojoClient`.
pub struct MojoClientBuilder {
    base_url: String,
    token: String,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl MojoClientBuilder {
    /// Timeout for the default transport. Ignored when a transport is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> MojoClient {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqTransport::new(self.timeout)),
        };
        MojoClient {
            base_url: self.base_url,
            token: self.token,
            transport,
        }
    }
}

/// Map non-200 statuses to errors before the body is classified.
fn check_status(request: &HttpRequest, response: &HttpResponse) -> Result<()> {
    match response.status {
        200 => Ok(()),
        403 => Err(forbidden(&response.body)),
        400 => Err(MojoError::Invalid {
            message: response.body.clone(),
            request: Some(request.context()),
        }),
        status => Err(MojoError::Status {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LOCKED_MESSAGE;

    fn client() -> MojoClient {
        MojoClient::new("http://localhost:3000", "5cf3edd8ccc78ea750abdcb9367fb072")
    }

    fn jason() -> Contact {
        Contact::new("654A4BFB-41B6-4058-B91E-879ECE2C5A0A", 2).with_name("Jason Polakow")
    }

    fn respond(status: u16, body: &str) -> Result<Vec<CreatedContact>> {
        let c = client();
        let req = c.build_add_contacts(&[jason()]).unwrap();
        c.parse_add_contacts(&req, HttpResponse::new(status, body))
    }

    #[test]
    fn build_add_contacts_produces_correct_request() {
        let req = client().build_add_contacts(&[jason()]).unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/contacts/bulk_create/");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(
            req.header("Authorization"),
            Some("Bearer 5cf3edd8ccc78ea750abdcb9367fb072")
        );
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{
                "api_contact_id": "654A4BFB-41B6-4058-B91E-879ECE2C5A0A",
                "full_name": "Jason Polakow",
                "contactgroup_set": [{"group_id": 2}],
            }])
        );
    }

    #[test]
    fn build_add_contacts_rejects_invalid_contact() {
        let err = client().build_add_contacts(&[Contact::new("x", 0)]).unwrap_err();
        assert_eq!(err.to_string(), "mojo: missing required field GroupID");
    }

    #[test]
    fn host_without_scheme_uses_https() {
        let c = MojoClient::new("posttest.mojosells.com", "t");
        let req = c.build_add_note("a", "b").unwrap();
        assert_eq!(req.url, "https://posttest.mojosells.com/api/notes/");
    }

    #[test]
    fn parse_success_returns_created() {
        let created = respond(
            200,
            r#"{"duplicated_api_contact_id": [], "errors": [], "result": [{"api_contact_id": "654A4BFB-41B6-4058-B91E-879ECE2C5A0A", "contact_id": 58}]}"#,
        )
        .unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].contact_id, Some(58));
    }

    #[test]
    fn parse_duplicate() {
        let err = respond(
            200,
            r#"{"errors":["Duplicated 'api_contact_id': X, Y"],"duplicated_api_contact_id":["X","Y"]}"#,
        )
        .unwrap_err();
        assert_eq!(err.duplicate_ids().unwrap(), ["X", "Y"]);
    }

    #[test]
    fn parse_locked() {
        let err = respond(200, &format!(r#"{{"errors": ["{LOCKED_MESSAGE}"], "result": null}}"#)).unwrap_err();
        assert!(err.is_locked());
        assert_eq!(err.to_string(), format!("mojo: {LOCKED_MESSAGE}"));
    }

    #[test]
    fn parse_invalid() {
        let err = respond(200, r#"{"errors": ["All contacts should have the same group_id."], "result": null}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "mojo: All contacts should have the same group_id.");
    }

    #[test]
    fn parse_wrong_status() {
        let err = respond(500, "opssss").unwrap_err();
        assert!(matches!(err, MojoError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "mojo: invalid status code 500 with body opssss");
    }

    #[test]
    fn parse_bad_request_keeps_context() {
        let err = respond(400, r#"{"full_name": ["too long"]}"#).unwrap_err();
        match err {
            MojoError::Invalid { message, request } => {
                assert_eq!(message, r#"{"full_name": ["too long"]}"#);
                let request = request.unwrap();
                assert!(request.url.ends_with("/api/contacts/bulk_create/"));
                assert!(request.body.contains("Jason Polakow"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_forbidden() {
        let err = respond(403, r#"{"detail": "Invalid access_token"}"#).unwrap_err();
        assert_eq!(err.to_string(), "mojo: Invalid access_token");
        let err = respond(403, "get out of here").unwrap_err();
        assert!(matches!(err, MojoError::Forbidden { ref message } if message == "get out of here"));
    }

    #[test]
    fn parse_forbidden_takes_precedence_over_body_shape() {
        let err = respond(403, r#"{"errors": ["x"], "duplicated_api_contact_id": ["a"]}"#).unwrap_err();
        assert!(matches!(err, MojoError::Forbidden { .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = respond(200, "ops").unwrap_err();
        assert!(matches!(err, MojoError::Decode(_)));
    }

    #[test]
    fn build_add_note_produces_correct_request() {
        let req = client().build_add_note("abc", "called today").unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/notes/");
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"api_contact_id": "abc", "contents": "called today", "type": 1})
        );
    }

    #[test]
    fn parse_add_note_errors() {
        let c = client();
        let req = c.build_add_note("abc", "hi").unwrap();
        let err = c
            .parse_add_note(&req, HttpResponse::new(200, r#"{"non_field_errors": ["Contact does not exist."]}"#))
            .unwrap_err();
        assert!(matches!(err, MojoError::Invalid { request: Some(_), .. }));
        assert!(c.parse_add_note(&req, HttpResponse::new(200, r#"{"id": 4}"#)).is_ok());
        assert!(matches!(
            c.parse_add_note(&req, HttpResponse::new(502, "bad gateway")),
            Err(MojoError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = MojoClient::new("http://localhost:3000/", "t");
        assert_eq!(c.base_url(), "http://localhost:3000");
    }

    #[test]
    fn debug_hides_token() {
        let dbg = format!("{:?}", client());
        assert!(dbg.contains("MojoClient"));
        assert!(!dbg.contains("5cf3edd8"));
    }

    #[test]
    fn from_config_validates() {
        assert!(MojoClient::from_config(&ClientConfig::new("h", "")).is_err());
        let c = MojoClient::from_config(&ClientConfig::new("posttest.mojosells.com", "t")).unwrap();
        assert_eq!(c.base_url(), "https://posttest.mojosells.com");
    }
}
