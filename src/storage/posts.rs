//! Post rows and their tag associations.

use std::collections::{BTreeSet, HashMap};

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::pagination::{Page, PageRequest};
use crate::post::Post;
use crate::tag::Tag;

#[derive(Debug, Clone, sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl PostRow {
    fn into_post(self, tags: BTreeSet<Tag>) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            tags,
        }
    }
}

/// Total number of posts.
pub async fn count(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(&mut *conn)
        .await?;
    Ok(u64::try_from(total).unwrap_or_default())
}

/// One page of all posts, with their tags.
pub async fn find_page(
    conn: &mut SqliteConnection,
    page: &PageRequest,
) -> Result<Page<Post>, sqlx::Error> {
    let total = count(conn).await?;

    let sql = format!(
        "SELECT p.id, p.title, p.content FROM posts p ORDER BY {} LIMIT ? OFFSET ?",
        page.sort.order_by_clause()
    );
    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

    let posts = attach_tags(conn, rows).await?;
    Ok(Page::new(posts, page, total))
}

/// Load a post and its tags.
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Post>, sqlx::Error> {
    let row = sqlx::query_as::<_, PostRow>("SELECT id, title, content FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(attach_tags(conn, vec![row]).await?.into_iter().next()),
        None => Ok(None),
    }
}

/// Insert a post without tags and return its identity.
pub async fn insert(
    conn: &mut SqliteConnection,
    title: &str,
    content: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO posts (title, content) VALUES (?, ?)")
        .bind(title)
        .bind(content)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Replace every association of a post with `tags`.
///
/// The statements run immediately on `conn`, so later statements in the same
/// transaction (orphan counting in particular) observe the new associations.
pub async fn replace_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tags: &BTreeSet<Tag>,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    for tag in tags {
        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Delete a post together with its associations. Returns `false` if no such
/// post existed.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Posts associated with every name in `tag_names`.
///
/// Posts are grouped by identity and kept only when their number of distinct
/// matching tags equals `required_count`. Ordering, `LIMIT` and `OFFSET` apply
/// to the filtered result.
pub async fn find_by_all_tags(
    conn: &mut SqliteConnection,
    tag_names: &BTreeSet<String>,
    required_count: usize,
    page: &PageRequest,
) -> Result<Page<Post>, sqlx::Error> {
    if tag_names.is_empty() {
        return Ok(Page::empty(page));
    }
    let required = i64::try_from(required_count).unwrap_or(i64::MAX);

    let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM (");
    push_matching_posts(&mut count_query, tag_names, required);
    count_query.push(")");
    let total = count_query
        .build_query_scalar::<i64>()
        .fetch_one(&mut *conn)
        .await?;

    let mut query = QueryBuilder::<Sqlite>::new("");
    push_matching_posts(&mut query, tag_names, required);
    query.push(" ORDER BY ");
    query.push(page.sort.order_by_clause());
    query.push(" LIMIT ");
    query.push_bind(page.limit());
    query.push(" OFFSET ");
    query.push_bind(page.offset());
    let rows = query.build_query_as::<PostRow>().fetch_all(&mut *conn).await?;

    let posts = attach_tags(conn, rows).await?;
    Ok(Page::new(posts, page, u64::try_from(total).unwrap_or_default()))
}

fn push_matching_posts(query: &mut QueryBuilder<'_, Sqlite>, tag_names: &BTreeSet<String>, required: i64) {
    query.push(
        "SELECT p.id, p.title, p.content FROM posts p \
         JOIN post_tags pt ON pt.post_id = p.id \
         JOIN tags t ON t.id = pt.tag_id \
         WHERE t.name IN (",
    );
    let mut names = query.separated(", ");
    for name in tag_names {
        names.push_bind(name.clone());
    }
    query.push(") GROUP BY p.id HAVING COUNT(DISTINCT t.id) = ");
    query.push_bind(required);
}

/// Tags of each listed post, keyed by post id.
pub async fn tags_for_posts(
    conn: &mut SqliteConnection,
    post_ids: &[i64],
) -> Result<HashMap<i64, BTreeSet<Tag>>, sqlx::Error> {
    let mut by_post: HashMap<i64, BTreeSet<Tag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(by_post);
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT pt.post_id, t.id, t.name FROM post_tags pt \
         JOIN tags t ON t.id = pt.tag_id \
         WHERE pt.post_id IN (",
    );
    let mut ids = query.separated(", ");
    for id in post_ids {
        ids.push_bind(*id);
    }
    query.push(")");

    let rows = query
        .build_query_as::<(i64, i64, String)>()
        .fetch_all(&mut *conn)
        .await?;
    for (post_id, id, name) in rows {
        by_post.entry(post_id).or_default().insert(Tag { id, name });
    }
    Ok(by_post)
}

async fn attach_tags(
    conn: &mut SqliteConnection,
    rows: Vec<PostRow>,
) -> Result<Vec<Post>, sqlx::Error> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut tags = tags_for_posts(conn, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let post_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_post(post_tags)
        })
        .collect())
}
