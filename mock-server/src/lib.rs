use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

/// Token the mock accepts. Anything else gets a 403.
pub const VALID_TOKEN: &str = "5cf3edd8ccc78ea750abdcb9367fb072";

pub const LOCKED_MESSAGE: &str = "Previous request was not finished or was interrupted.";
pub const MIXED_GROUPS_MESSAGE: &str = "All contacts should have the same group_id.";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GroupRef {
    pub group_id: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MediaInfo {
    #[serde(rename = "type")]
    pub kind: u8,
    pub value: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContactNote {
    #[serde(rename = "type")]
    pub kind: u8,
    pub contents: String,
}

/// A contact as Mojo receives it on `bulk_create`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContactIn {
    pub api_contact_id: String,
    #[serde(default)]
    pub full_name: String,
    pub contactgroup_set: Vec<GroupRef>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    #[serde(default)]
    pub contactnote_set: Vec<ContactNote>,
    #[serde(default)]
    pub mediainfo_set: Vec<MediaInfo>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteIn {
    pub api_contact_id: String,
    pub contents: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct StoredContact {
    pub contact_id: u64,
    pub contact: ContactIn,
    pub notes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub contacts: HashMap<String, StoredContact>,
    pub next_id: u64,
    /// When set, every `bulk_create` answers as if a previous request were
    /// still running.
    pub locked: bool,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/api/contacts/bulk_create/", post(bulk_create))
        .route("/api/notes/", post(create_note))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_db(listener, Db::default()).await
}

pub async fn run_with_db(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        == Some(VALID_TOKEN)
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"detail": "Invalid access_token"})),
    )
        .into_response()
}

async fn bulk_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(contacts): Json<Vec<ContactIn>>,
) -> Response {
    if !authorized(&headers) {
        tracing::warn!("bulk_create with invalid token");
        return forbidden();
    }
    let mut store = db.write().await;
    if store.locked {
        return Json(json!({"errors": [LOCKED_MESSAGE], "result": null})).into_response();
    }

    let mut groups = contacts
        .iter()
        .map(|c| c.contactgroup_set.first().map(|g| g.group_id));
    if let Some(first) = groups.next() {
        if first.is_none() || groups.any(|g| g != first) {
            return Json(json!({"errors": [MIXED_GROUPS_MESSAGE], "result": null})).into_response();
        }
    }

    let mut duplicated = Vec::new();
    let mut result = Vec::new();
    for contact in contacts {
        if store.contacts.contains_key(&contact.api_contact_id) {
            duplicated.push(contact.api_contact_id);
            continue;
        }
        store.next_id += 1;
        let contact_id = store.next_id;
        result.push(json!({"api_contact_id": contact.api_contact_id, "contact_id": contact_id}));
        let notes = contact.contactnote_set.iter().map(|n| n.contents.clone()).collect();
        store.contacts.insert(
            contact.api_contact_id.clone(),
            StoredContact {
                contact_id,
                contact,
                notes,
            },
        );
    }

    tracing::info!(created = result.len(), duplicated = duplicated.len(), "bulk_create");
    let errors = if duplicated.is_empty() {
        Vec::new()
    } else {
        vec![format!("Duplicated 'api_contact_id': {}", duplicated.join(", "))]
    };
    Json(json!({
        "duplicated_api_contact_id": duplicated,
        "errors": errors,
        "result": result,
    }))
    .into_response()
}

async fn create_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(note): Json<NoteIn>,
) -> Response {
    if !authorized(&headers) {
        return forbidden();
    }
    if note.contents.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"contents": ["This field may not be blank."]})),
        )
            .into_response();
    }
    let mut store = db.write().await;
    match store.contacts.get_mut(&note.api_contact_id) {
        Some(stored) => {
            stored.notes.push(note.contents.clone());
            Json(json!({
                "api_contact_id": note.api_contact_id,
                "contents": note.contents,
                "type": note.kind,
            }))
            .into_response()
        }
        None => Json(json!({
            "non_field_errors": [format!("Contact with api_contact_id {} does not exist.", note.api_contact_id)]
        }))
        .into_response(),
    }
}
