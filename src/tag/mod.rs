//! Tag management module.
//!
//! Tags are shared between posts and identified by their normalized name:
//! - Resolving client names to stored tags, creating them on first use
//! - Deleting tags that no post references any more

mod manager;
mod types;

pub use manager::{enrich_tag, enrich_tags, reclaim_orphans};
pub use types::{normalize_tag_name, Tag, TagError, TagInput};
