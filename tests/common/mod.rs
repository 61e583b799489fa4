//! Common test utilities

use blog_api::config::{DatabaseConfig, PaginationConfig};
use blog_api::post::{Post, PostPayload, PostService};
use blog_api::server::{router, AppState};
use blog_api::storage;
use sqlx::SqlitePool;

/// Open a fresh in-memory database with the schema applied.
pub async fn create_test_pool() -> SqlitePool {
    storage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("Failed to open in-memory database")
}

/// A `PostService` over a fresh in-memory database.
pub async fn create_test_service() -> PostService {
    PostService::new(create_test_pool().await)
}

/// A `PostService` over a database file in `dir`, with a pool of several
/// connections.
#[allow(dead_code)]
pub async fn create_file_service(dir: &std::path::Path) -> PostService {
    let pool = storage::connect(&DatabaseConfig {
        url: format!("sqlite://{}", dir.join("blog.db").display()),
        max_connections: 5,
    })
    .await
    .expect("Failed to open file database");
    PostService::new(pool)
}

/// The API router over a fresh in-memory database, plus the service behind it.
#[allow(dead_code)] // Only used by the HTTP tests
pub async fn create_test_app() -> (axum::Router, PostService) {
    let service = create_test_service().await;
    let state = AppState::new(service.clone(), PaginationConfig::default());
    (router(state), service)
}

/// Create a post with the given tags.
#[allow(dead_code)]
pub async fn create_post(service: &PostService, title: &str, tags: &[&str]) -> Post {
    service
        .create(PostPayload::new(title, format!("{title} content")).with_tags(tags.iter().copied()))
        .await
        .expect("Failed to create post")
}

/// Tag names of a post, in tag identity order.
#[allow(dead_code)]
pub fn tag_names(post: &Post) -> Vec<String> {
    post.tags.iter().map(|t| t.name.clone()).collect()
}
