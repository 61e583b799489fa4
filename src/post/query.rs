//! Tag-filtered post listing.

use super::types::Post;
use crate::pagination::{Page, PageRequest};
use crate::storage;
use crate::tag::normalize_tag_name;
use sqlx::SqliteConnection;
use std::collections::BTreeSet;

/// Normalize query-side tag names the same way stored names are normalized,
/// dropping blanks and duplicates.
#[must_use]
pub fn normalize_query_tags<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| normalize_tag_name(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect()
}

/// Posts carrying every tag in `tag_names` (exact match on stored names).
///
/// An empty set matches nothing.
pub async fn find_by_all_tags(
    conn: &mut SqliteConnection,
    tag_names: &BTreeSet<String>,
    page: &PageRequest,
) -> Result<Page<Post>, sqlx::Error> {
    storage::posts::find_by_all_tags(conn, tag_names, tag_names.len(), page).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query_tags() {
        let names = normalize_query_tags([" Java", "java", "", "  ", "Cloud"]);
        let expected: BTreeSet<String> = ["cloud", "java"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_normalize_query_tags_empty() {
        let names = normalize_query_tags(Vec::<String>::new());
        assert!(names.is_empty());
    }
}
