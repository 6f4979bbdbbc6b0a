// Wire types for the bookshelf API.
//
// Every record is deserialized leniently: absent fields default, numeric
// fields also accept numeric strings, and unknown keys are kept in `extra`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// Value of the envelope `status` field on success.
pub const STATUS_SUCCESS: &str = "success";

/// The `{status, message}` part common to every response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// A server-side record id: numeric on Calibre-backed servers, but strings
/// are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

// ── GET data ────────────────────────────────────────────────────────

/// Full library payload returned by `GET data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataResponse {
    #[serde(default)]
    pub books: Vec<BookRecord>,
    /// Keyed by the book id rendered as a string (JSON object keys).
    #[serde(default)]
    pub progress: HashMap<String, ProgressRecord>,
    #[serde(default)]
    pub shelves: Vec<ShelfRecord>,
    #[serde(default)]
    pub user: UserRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub series: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub series_index: Option<f64>,
    #[serde(default)]
    pub shelves: Option<Vec<RecordId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressRecord {
    #[serde(default, deserialize_with = "lenient::float")]
    pub percent: Option<f64>,
    /// Reader position; opaque to the client.
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub data: Option<ReadingData>,
}

/// User-entered reading metadata stored alongside progress.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingData {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub feelings: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub total_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub review: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub favorite: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub shelves: Option<Vec<RecordId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShelfRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    /// Calibre stores this as an integer flag.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

// ── Mutations ───────────────────────────────────────────────────────

/// Body of `POST book`. Only set fields are sent; the server merges them
/// into the stored metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feelings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelves: Option<Vec<RecordId>>,
}

/// Body of `POST shelf`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ShelfRequest {
    Create {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_public: Option<bool>,
    },
    Delete {
        id: RecordId,
    },
}

/// Body of `POST profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfilePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct IdBody<'a> {
    pub id: &'a RecordId,
}

/// Optional fields returned alongside a successful mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn shelf_request_is_tagged_by_action() {
        let create = ShelfRequest::Create {
            name: "Sci-Fi".into(),
            is_public: None,
        };
        assert_eq!(
            serde_json::to_value(&create).ok(),
            Some(json!({"action": "create", "name": "Sci-Fi"}))
        );

        let delete = ShelfRequest::Delete { id: 4.into() };
        assert_eq!(
            serde_json::to_value(&delete).ok(),
            Some(json!({"action": "delete", "id": 4}))
        );
    }

    #[test]
    fn book_payload_uses_camel_case_and_skips_unset() {
        let payload = BookPayload {
            id: Some(7.into()),
            status: Some("lendo".into()),
            total_pages: Some(320),
            ..BookPayload::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).ok(),
            Some(json!({"id": 7, "status": "lendo", "totalPages": 320}))
        );
    }

    #[test]
    fn reading_data_tolerates_loose_types() {
        let raw = json!({
            "status": "lido",
            "rating": "4.5",
            "feelings": "cozy",
            "totalPages": "300",
            "favorite": 1,
            "customField": true
        });
        let data: ReadingData = serde_json::from_value(raw).unwrap_or_default();
        assert_eq!(data.status.as_deref(), Some("lido"));
        assert_eq!(data.rating, Some(4.5));
        assert_eq!(data.feelings, vec!["cozy".to_owned()]);
        assert_eq!(data.total_pages, Some(300));
        assert_eq!(data.favorite, Some(true));
        assert!(data.extra.contains_key("customField"));
    }

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_value(json!([3, "abc"])).unwrap_or_default();
        assert_eq!(ids, vec![RecordId::Int(3), RecordId::Text("abc".into())]);
        assert_eq!(ids[0].to_string(), "3");
    }
}
