use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default priority tag for new todos.
///
/// Priority is a free-form tag rather than a closed enum so that imported
/// data carrying unknown tags survives decoding untouched.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Which subset of the collection the derived views expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

/// A single task record.
///
/// Serializes camelCase to match the persistence slot and export envelope
/// formats (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

impl Todo {
    /// Create a todo from already-sanitized text. `id` is opaque and unique,
    /// both timestamps are set to now.
    pub fn new(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
            priority: default_priority(),
        }
    }
}
