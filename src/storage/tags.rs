//! Tag rows.

use crate::tag::Tag;
use sqlx::SqliteConnection;

/// Find a tag by its exact (already normalized) name.
pub async fn find_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
}

/// Insert a tag and return it with its new identity.
///
/// Fails with a unique violation if the name is already taken.
pub async fn insert(conn: &mut SqliteConnection, name: &str) -> Result<Tag, sqlx::Error> {
    let id = sqlx::query("INSERT INTO tags (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    Ok(Tag {
        id,
        name: name.to_string(),
    })
}

/// Delete a tag. Returns `false` if it was already gone.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Number of posts currently associated with a tag.
pub async fn count_posts_for_tag(conn: &mut SqliteConnection, id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_tags WHERE tag_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}

/// All tags ordered by id.
///
/// No request path lists tags. This exists for the test suites under `tests/`,
/// which cannot reach `cfg(test)` items, to inspect the tag table.
pub async fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
        .fetch_all(&mut *conn)
        .await
}
