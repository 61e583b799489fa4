//! Tag resolution and orphan cleanup.

use super::types::{normalize_tag_name, Tag, TagError, TagInput};
use crate::storage::{self, tags as tag_store};
use sqlx::SqliteConnection;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Resolve a client-supplied name to a stored tag, creating it if needed.
///
/// The name is normalized first, so `" Java "` and `"java"` resolve to the same
/// tag. A concurrent insert of the same name surfaces as a unique violation; in
/// that case the winner's row is looked up once more instead of failing.
pub async fn enrich_tag(conn: &mut SqliteConnection, name: &str) -> Result<Tag, TagError> {
    let name = normalize_tag_name(name);
    if name.is_empty() {
        return Err(TagError::InvalidTagName(
            "Tag name cannot be empty".to_string(),
        ));
    }

    if let Some(tag) = tag_store::find_by_name(conn, &name).await? {
        debug!("Resolved existing tag '{}' ({})", tag.name, tag.id);
        return Ok(tag);
    }

    insert_or_find(conn, &name).await
}

/// Insert a normalized name, falling back to a lookup when another writer
/// stored it first.
pub(crate) async fn insert_or_find(conn: &mut SqliteConnection, name: &str) -> Result<Tag, TagError> {
    match tag_store::insert(conn, name).await {
        Ok(tag) => {
            info!("Created tag '{}' ({})", tag.name, tag.id);
            Ok(tag)
        }
        Err(e) if storage::is_unique_violation(&e) => {
            warn!("Tag '{}' was created concurrently, retrying lookup", name);
            tag_store::find_by_name(conn, name)
                .await?
                .ok_or_else(|| TagError::Conflict(name.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve every input by name, collapsing duplicates after normalization.
pub async fn enrich_tags(
    conn: &mut SqliteConnection,
    inputs: &[TagInput],
) -> Result<BTreeSet<Tag>, TagError> {
    let mut resolved = BTreeSet::new();
    for input in inputs {
        resolved.insert(enrich_tag(conn, &input.name).await?);
    }
    Ok(resolved)
}

/// Delete every tag in `candidates` that no post references any more.
///
/// Must run after the association change that may have orphaned them, on the
/// same connection or transaction. Returns the tags that were deleted.
pub async fn reclaim_orphans(
    conn: &mut SqliteConnection,
    candidates: &BTreeSet<Tag>,
) -> Result<Vec<Tag>, TagError> {
    let mut reclaimed = Vec::new();
    for tag in candidates {
        if tag_store::count_posts_for_tag(conn, tag.id).await? > 0 {
            continue;
        }
        if tag_store::delete(conn, tag.id).await? {
            info!("Tag '{}' became unassociated and deleted", tag.name);
            reclaimed.push(tag.clone());
        }
    }
    Ok(reclaimed)
}
