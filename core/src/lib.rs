//! Client for the Mojo CRM contact-ingestion API.
//!
//! # Overview
//! Serializes contacts into Mojo's JSON envelope, submits them to the
//! `bulk_create` endpoint, and turns Mojo's overloaded 200 responses into
//! typed results. Notes can be appended to existing contacts.
//!
//! ```no_run
//! use mojo_core::{Contact, MojoClient, MojoError};
//!
//! let client = MojoClient::new("posttest.mojosells.com", "access-token");
//! let contact = Contact::new("654A4BFB-41B6-4058-B91E-879ECE2C5A0A", 2)
//!     .with_name("Jason Polakow")
//!     .with_mobile_phone("123-331-1245");
//!
//! match client.add_contact(&contact) {
//!     Ok(_) => {}
//!     Err(MojoError::Duplicate { ids }) => println!("already there: {ids:?}"),
//!     Err(err) if err.is_locked() => println!("try again later"),
//!     Err(err) => return Err(err),
//! }
//! client.add_note(&contact.id, "called him today")?;
//! # Ok::<(), MojoError>(())
//! ```
//!
//! # Design
//! - `MojoClient` is stateless apart from an immutable, shared `Transport`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); `add_*` runs both through the transport.
//! - `encode` and `classify` hold the protocol rules and never touch I/O.

pub mod classify;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod http;
pub mod phone;
pub mod transport;
pub mod types;
pub mod wire;

pub use classify::{Outcome, LOCKED_MESSAGE};
pub use client::{MojoClient, MojoClientBuilder};
pub use config::ClientConfig;
pub use error::{MojoError, Result};
pub use http::{HttpRequest, HttpResponse, RequestContext};
pub use transport::{Transport, UreqTransport};
pub use types::{Contact, CreatedContact};
