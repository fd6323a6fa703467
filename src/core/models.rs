//! Wire shapes exchanged with the catalog backend.
//!
//! Field names follow the backend's camelCase JSON. Book ids are always held
//! as strings; numeric ids coming off the wire are converted on decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Catalog entries
// ============================================================================

/// One catalog entry as exposed by the backend.
///
/// `id` is `None` only for an entry that has not been created yet; anything
/// returned by a read operation carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    pub publication_year: i32,
    #[serde(default)]
    pub description: String,
}

impl Book {
    /// Key used to identify the entry in lists. Falls back to the title for
    /// entries the backend has not assigned an id to.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

/// Payload for creating an entry. The backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
    pub description: String,
}

impl NewBook {
    /// Attach a server-assigned id, producing the entry the backend would return.
    pub fn with_id(self, id: impl Into<String>) -> Book {
        Book {
            id: Some(id.into()),
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            publication_year: self.publication_year,
            description: self.description,
        }
    }
}

/// Partial update. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Insights
// ============================================================================

/// AI-generated commentary for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "bookId", deserialize_with = "deserialize_id")]
    pub book_id: String,
    #[serde(rename = "insights", default)]
    pub content: String,
}

impl Insight {
    /// Whether there is any text worth showing.
    pub fn is_usable(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    /// Validation errors keyed by field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Generic response envelope. The catalog endpoints return bare payloads, so
/// nothing in the client wraps responses in this today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ── Id decoding ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
