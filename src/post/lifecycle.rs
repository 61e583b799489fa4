//! Post lifecycle: create, read, retag and delete.
//!
//! Every mutating operation runs in a single write transaction that also
//! covers tag resolution and orphan reclamation. Returning early with `?` drops
//! the transaction, which rolls it back.

use super::query::{find_by_all_tags, normalize_query_tags};
use super::types::{Post, PostError, PostPayload};
use crate::pagination::{Page, PageRequest};
use crate::storage;
use crate::tag::{enrich_tags, reclaim_orphans, TagInput};
use crate::validation::{validate_post, validate_tags};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Entry point for everything that reads or changes posts.
#[derive(Debug, Clone)]
pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// One page of all posts.
    pub async fn find_all(&self, page: &PageRequest) -> Result<Page<Post>, PostError> {
        let mut conn = self.pool.acquire().await?;
        Ok(storage::posts::find_page(&mut conn, page).await?)
    }

    /// One page of the posts tagged with every name in `tag_names`.
    ///
    /// Names are normalized before matching. When nothing is left after
    /// normalization the listing is unfiltered.
    pub async fn find_by_tags<I, S>(
        &self,
        tag_names: I,
        page: &PageRequest,
    ) -> Result<Page<Post>, PostError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = normalize_query_tags(tag_names);
        if names.is_empty() {
            return self.find_all(page).await;
        }

        let mut conn = self.pool.acquire().await?;
        Ok(find_by_all_tags(&mut conn, &names, page).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Post, PostError> {
        let mut conn = self.pool.acquire().await?;
        storage::posts::find_by_id(&mut conn, id)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    /// Validate and persist a new post, resolving its tags by name.
    pub async fn create(&self, payload: PostPayload) -> Result<Post, PostError> {
        if let Err(errors) = validate_post(&payload) {
            warn!("Rejected new post: {}", errors.join(", "));
            return Err(PostError::ValidationFailed(errors));
        }

        let mut tx = storage::begin_write(&self.pool).await?;
        let tags = enrich_tags(&mut *tx, &payload.tags).await?;
        let id = storage::posts::insert(&mut *tx, &payload.title, &payload.content).await?;
        storage::posts::replace_tags(&mut *tx, id, &tags).await?;
        tx.commit().await?;

        info!("Saved new post {} with {} tag(s)", id, tags.len());
        Ok(Post {
            id,
            title: payload.title,
            content: payload.content,
            tags,
        })
    }

    /// Replace the tag set of a post.
    ///
    /// When the resolved set equals the current one nothing is written and
    /// the post is returned as it was. Otherwise tags the post no longer uses
    /// are deleted if no other post references them.
    pub async fn update_tags(&self, id: i64, new_tags: Vec<TagInput>) -> Result<Post, PostError> {
        if let Err(errors) = validate_tags(&new_tags) {
            warn!("Rejected tags for post {}: {}", id, errors.join(", "));
            return Err(PostError::ValidationFailed(errors));
        }

        let mut tx = storage::begin_write(&self.pool).await?;
        let Some(post) = storage::posts::find_by_id(&mut *tx, id).await? else {
            warn!("Post {} not found", id);
            return Err(PostError::NotFound(id));
        };

        let old_tags = post.tags.clone();
        let tags = enrich_tags(&mut *tx, &new_tags).await?;
        if tags == old_tags {
            tx.rollback().await?;
            info!("Post {} already has these tags, not updated", id);
            return Ok(post);
        }

        storage::posts::replace_tags(&mut *tx, id, &tags).await?;
        let reclaimed = reclaim_orphans(&mut *tx, &old_tags).await?;
        tx.commit().await?;

        info!(
            "Updated tags of post {}: {} tag(s), {} reclaimed",
            id,
            tags.len(),
            reclaimed.len()
        );
        Ok(Post { tags, ..post })
    }

    /// Delete a post and reclaim any of its tags left without posts.
    pub async fn delete(&self, id: i64) -> Result<(), PostError> {
        let mut tx = storage::begin_write(&self.pool).await?;
        let Some(post) = storage::posts::find_by_id(&mut *tx, id).await? else {
            warn!("Post {} not found", id);
            return Err(PostError::NotFound(id));
        };

        storage::posts::delete(&mut *tx, id).await?;
        let reclaimed = reclaim_orphans(&mut *tx, &post.tags).await?;
        tx.commit().await?;

        info!("Deleted post {} ({} tag(s) reclaimed)", id, reclaimed.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod lifecycle_tests;
