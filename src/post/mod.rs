//! Blog posts and their tag associations.

mod lifecycle;
mod query;
mod types;

pub use lifecycle::PostService;
pub use query::{find_by_all_tags, normalize_query_tags};
pub use types::{Post, PostError, PostPayload};
