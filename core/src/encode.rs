//! Maps `Contact` values onto Mojo's wire envelope.
//!
//! Optional fields are emitted only when the caller filled them in: empty
//! strings and empty lists are left out rather than sent as `""` or `[]`.
//! Phone numbers are cleaned before sending; emails go through untouched.

use crate::error::{MojoError, Result};
use crate::phone::clean_phone;
use crate::types::Contact;
use crate::wire::{GroupRef, MediaInfo, MediaType, NoteEntry, WireContact, WireNote, NOTE_TYPE_GENERAL};

/// Build the wire envelope for one contact.
pub fn encode_contact(contact: &Contact) -> Result<WireContact> {
    if contact.id.is_empty() {
        return Err(MojoError::MissingField("ID"));
    }
    if contact.group_id == 0 {
        return Err(MojoError::MissingField("GroupID"));
    }

    let notes: Vec<NoteEntry> = contact
        .notes
        .iter()
        .map(|contents| NoteEntry {
            kind: NOTE_TYPE_GENERAL,
            contents: contents.clone(),
        })
        .collect();

    Ok(WireContact {
        api_contact_id: contact.id.clone(),
        full_name: contact.name.clone(),
        contactgroup_set: [GroupRef {
            group_id: contact.group_id,
        }],
        address: non_empty(&contact.address),
        city: non_empty(&contact.city),
        state: non_empty(&contact.state),
        zip_code: non_empty(&contact.zip),
        contactnote_set: (!notes.is_empty()).then_some(notes),
        mediainfo_set: media_set(contact),
    })
}

/// Encode contacts in caller order. Fails on the first invalid contact.
pub fn encode_contacts(contacts: &[Contact]) -> Result<Vec<WireContact>> {
    contacts.iter().map(encode_contact).collect()
}

/// Render the `bulk_create` request body.
pub fn contacts_body(contacts: &[Contact]) -> Result<String> {
    let wire = encode_contacts(contacts)?;
    serde_json::to_string(&wire).map_err(|e| MojoError::Encoding(e.to_string()))
}

/// Render the `notes` request body.
pub fn note_body(api_contact_id: &str, contents: &str) -> Result<String> {
    if api_contact_id.is_empty() {
        return Err(MojoError::MissingField("ID"));
    }
    let note = WireNote {
        api_contact_id: api_contact_id.to_string(),
        contents: contents.to_string(),
        kind: NOTE_TYPE_GENERAL,
    };
    serde_json::to_string(&note).map_err(|e| MojoError::Encoding(e.to_string()))
}

// work, mobile, home, email: Mojo shows them in this order.
fn media_set(contact: &Contact) -> Option<Vec<MediaInfo>> {
    let phones = [
        (MediaType::Work, &contact.work_phone),
        (MediaType::Mobile, &contact.mobile_phone),
        (MediaType::Home, &contact.home_phone),
    ];
    let mut media: Vec<MediaInfo> = phones
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(kind, value)| MediaInfo::new(kind, clean_phone(value)))
        .collect();
    if !contact.email.is_empty() {
        media.push(MediaInfo::new(MediaType::Email, contact.email.clone()));
    }
    (!media.is_empty()).then_some(media)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
