//! Turns Mojo response bodies into typed outcomes.
//!
//! # Design
//! Mojo answers a bulk request with HTTP 200 whether it succeeded, found
//! duplicates, rejected the payload, or refused to run because another
//! request is in flight. Only the combination of `errors` and
//! `duplicated_api_contact_id` tells them apart, so `classify` checks an
//! ordered list of rules and stops at the first one that matches:
//!
//! 1. locked: a single error equal to [`LOCKED_MESSAGE`]
//! 2. duplicate: errors plus duplicated ids
//! 3. invalid: any other errors
//! 4. success: no errors

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::Value;
use tracing::warn;

use crate::error::{MojoError, Result};
use crate::http::HttpRequest;
use crate::types::CreatedContact;
use crate::wire::{BulkCreateResponse, NoteResponse};

/// Error text Mojo uses when a previous bulk request for the account has not
/// finished yet.
pub const LOCKED_MESSAGE: &str = "Previous request was not finished or was interrupted.";

/// What a 200 `bulk_create` response means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Vec<CreatedContact>),
    Locked(String),
    Duplicate(Vec<String>),
    Invalid(String),
}

impl Outcome {
    pub fn into_result(self) -> Result<Vec<CreatedContact>> {
        match self {
            Outcome::Success(created) => Ok(created),
            Outcome::Locked(message) => Err(MojoError::Locked { message }),
            Outcome::Duplicate(ids) => Err(MojoError::Duplicate { ids }),
            Outcome::Invalid(message) => Err(MojoError::Invalid {
                message,
                request: None,
            }),
        }
    }
}

type Rule = (fn(&BulkCreateResponse) -> bool, fn(BulkCreateResponse) -> Outcome);

const RULES: [Rule; 3] = [
    (is_locked, locked),
    (is_duplicate, duplicate),
    (is_error, invalid),
];

/// Classify a decoded `bulk_create` response.
pub fn classify(response: BulkCreateResponse) -> Outcome {
    match RULES.iter().find(|(applies, _)| applies(&response)) {
        Some((_, outcome)) => outcome(response),
        None => Outcome::Success(response.result),
    }
}

/// Decode and classify a 200 `bulk_create` body.
pub fn classify_body(body: &str) -> Result<Outcome> {
    let response: BulkCreateResponse = decode_object(body)?;
    Ok(classify(response))
}

/// Build the error for a 403 response. Mojo normally sends
/// `{"detail": "..."}`; anything else is passed through verbatim.
pub fn forbidden(body: &str) -> MojoError {
    let detail = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut map)) => match map.remove("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => None,
        },
        _ => None,
    };
    let message = detail.unwrap_or_else(|| body.to_string());
    warn!(%message, "mojo rejected credentials");
    MojoError::Forbidden { message }
}

/// Decode and check a 200 notes body.
pub fn check_note_body(request: &HttpRequest, body: &str) -> Result<()> {
    let response: NoteResponse = decode_object(body)?;
    if response.non_field_errors.is_empty() {
        return Ok(());
    }
    Err(MojoError::Invalid {
        message: response.non_field_errors.join(" "),
        request: Some(request.context()),
    })
}

/// Decode a response envelope. Derived structs also accept JSON arrays, so
/// anything but an object is rejected before it reaches serde.
fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body).map_err(MojoError::Decode)?;
    if value.is_object() {
        return serde_json::from_value(value).map_err(MojoError::Decode);
    }
    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Array(_) => Unexpected::Seq,
        Value::String(s) => Unexpected::Str(s),
        Value::Number(_) => Unexpected::Other("number"),
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Null => Unexpected::Unit,
    };
    Err(MojoError::Decode(serde_json::Error::invalid_type(
        unexpected,
        &"a JSON object",
    )))
}

fn is_error(resp: &BulkCreateResponse) -> bool {
    !resp.errors.is_empty()
}

fn is_locked(resp: &BulkCreateResponse) -> bool {
    resp.errors.len() == 1 && resp.errors[0] == LOCKED_MESSAGE
}

fn is_duplicate(resp: &BulkCreateResponse) -> bool {
    is_error(resp) && !resp.duplicated_api_contact_id.is_empty()
}

fn locked(resp: BulkCreateResponse) -> Outcome {
    Outcome::Locked(resp.errors.join(" "))
}

fn duplicate(resp: BulkCreateResponse) -> Outcome {
    Outcome::Duplicate(resp.duplicated_api_contact_id)
}

fn invalid(resp: BulkCreateResponse) -> Outcome {
    Outcome::Invalid(resp.errors.join(" "))
}
