//! Mojo's JSON schema, request and response side.
//!
//! # Design
//! Field order in `WireContact` is the order Mojo's own tooling emits and is
//! relied on by byte-exact tests. Optional parts are `Option`s skipped when
//! `None`; whether they are `Some` is decided by `encode`, never by serde.
//! Response envelopes accept `null` or missing collections as empty.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::CreatedContact;

/// Note type Mojo uses for free-text notes.
pub const NOTE_TYPE_GENERAL: u8 = 1;

/// Kind of a `mediainfo_set` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MediaType {
    Work = 1,
    Mobile = 2,
    Home = 3,
    Email = 4,
    /// Not produced from a `Contact`; listed so every protocol code has a variant.
    Other = 5,
}

impl MediaType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One contact in a `bulk_create` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireContact {
    pub api_contact_id: String,
    pub full_name: String,
    pub contactgroup_set: [GroupRef; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contactnote_set: Option<Vec<NoteEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediainfo_set: Option<Vec<MediaInfo>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupRef {
    pub group_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    #[serde(rename = "type")]
    pub kind: u8,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaInfo {
    #[serde(rename = "type")]
    pub kind: u8,
    pub value: String,
}

impl MediaInfo {
    pub fn new(kind: MediaType, value: String) -> Self {
        Self {
            kind: kind.code(),
            value,
        }
    }
}

/// Body of a `POST /api/notes/` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireNote {
    pub api_contact_id: String,
    pub contents: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Body of a `bulk_create` response. Every status Mojo reports on a 200
/// comes through this one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BulkCreateResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub duplicated_api_contact_id: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<CreatedContact>,
}

/// Body of a notes response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub non_field_errors: Vec<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
