//! Post type definitions and error types.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::tag::{Tag, TagError, TagInput};
use crate::validation::not_blank;

/// A stored blog post and its resolved tags.
///
/// Two posts are equal when id, title and content match; tag membership is
/// not part of equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Associated tags, ordered by id
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.title == other.title && self.content == other.content
    }
}

impl Eq for Post {}

/// Body of a create request.
///
/// Missing or `null` fields deserialize to empty values so that validation,
/// not deserialization, reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "Title cannot be empty"))]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "Post content cannot be empty"))]
    pub content: String,

    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<TagInput>,
}

impl PostPayload {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(|t| TagInput::new(t)).collect();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Post-related errors
#[derive(Error, Debug)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(i64),

    #[error("Validation failed: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
