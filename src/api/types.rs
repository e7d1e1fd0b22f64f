//! Wire types for the board backend
//!
//! Field names follow the backend's camelCase JSON. Timestamps are RFC 3339
//! and parsed into `chrono::DateTime<Utc>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    /// Account identifier; the backend expects an email address.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Error body of a rejected signup. The backend reports per-field message
/// arrays; any field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRejection {
    #[serde(default)]
    pub username: Option<Vec<String>>,
    #[serde(default)]
    pub password: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<Vec<String>>,
}

impl SignupRejection {
    /// Picks the first field message, in the backend's precedence order:
    /// username, then password, then name.
    pub fn first_message(&self) -> Option<&str> {
        [&self.username, &self.password, &self.name]
            .into_iter()
            .flatten()
            .flat_map(|messages| messages.first())
            .map(String::as_str)
            .next()
    }
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

/// One row of `GET /boards`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: u64,
    pub title: String,
    /// Category key; resolve to a display label via `/boards/categories`.
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Envelope of `GET /boards`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardListPage {
    pub content: Vec<BoardSummary>,
}

/// Body of `GET /boards/{id}` (and, leniently, of create/update responses).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub board_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The JSON `request` part of board create/update multipart calls.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDraft {
    pub title: String,
    pub content: String,
    pub category: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
