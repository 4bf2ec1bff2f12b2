//! Caller-facing DTOs.
//!
//! # Design
//! `Contact` is the shape callers work with: flat, Rust-named fields where an
//! empty string means "not provided". It never reaches the wire directly;
//! `encode` maps it onto the nested envelope Mojo expects. Deriving serde here
//! only lets callers load contacts from their own JSON.

use serde::{Deserialize, Serialize};

/// A contact to be created in Mojo.
///
/// `id` and `group_id` are required. Mojo also expects either `name` or at
/// least one of `email`, `mobile_phone`, `work_phone`, `home_phone`; that is
/// not checked locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Caller-chosen identity, Mojo's idempotency key (`api_contact_id`).
    pub id: String,
    pub group_id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub mobile_phone: String,
    pub work_phone: String,
    pub home_phone: String,
    /// Sent in order as separate notes.
    pub notes: Vec<String>,
}

impl Contact {
    pub fn new(id: impl Into<String>, group_id: u32) -> Self {
        Self {
            id: id.into(),
            group_id,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = zip.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_mobile_phone(mut self, phone: impl Into<String>) -> Self {
        self.mobile_phone = phone.into();
        self
    }

    pub fn with_work_phone(mut self, phone: impl Into<String>) -> Self {
        self.work_phone = phone.into();
        self
    }

    pub fn with_home_phone(mut self, phone: impl Into<String>) -> Self {
        self.home_phone = phone.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// A record Mojo reports as created by a bulk request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedContact {
    pub api_contact_id: String,
    /// Mojo's internal id for the contact.
    pub contact_id: Option<u64>,
}
