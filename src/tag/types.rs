//! Tag type definitions and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::validation::not_blank;

/// A tag shared by any number of posts.
///
/// Equality, ordering and hashing all use `(id, name)`. Posts never hold a
/// tag that has not been resolved through [`super::enrich_tag`], so the id is
/// always the stored identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Database identity
    pub id: i64,
    /// Normalized name (trimmed, lowercase)
    pub name: String,
}

/// A tag as supplied by a client, before it is resolved to a stored [`Tag`].
///
/// Accepts either a bare JSON string (`"rust"`) or an object
/// (`{"name": "rust"}`). Any `id` sent by the client is ignored; identity is
/// always looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(from = "RawTagInput")]
pub struct TagInput {
    #[validate(custom(function = "not_blank", message = "Tag name cannot be empty"))]
    pub name: String,
}

impl TagInput {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTagInput {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<RawTagInput> for TagInput {
    fn from(raw: RawTagInput) -> Self {
        match raw {
            RawTagInput::Name(name) => Self { name },
            RawTagInput::Object { name } => Self {
                name: name.unwrap_or_default(),
            },
        }
    }
}

/// Tag-related errors
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),

    #[error("Tag '{0}' could not be resolved after a conflicting insert")]
    Conflict(String),
}

/// Canonical form of a tag name: surrounding whitespace trimmed, lowercase.
#[must_use]
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}
