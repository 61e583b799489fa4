//! HTTP boundary: routes under `/api/v1/posts` mapped onto [`PostService`].

pub mod error_mapping;
pub mod handlers;
pub mod structured_error;

use axum::routing::{get, patch};
use axum::Router;

use crate::config::PaginationConfig;
use crate::post::PostService;

pub use error_mapping::ToStructuredError;
pub use structured_error::{ApiError, StructuredError};

/// Base path of the posts resource.
pub const POSTS_PATH: &str = "/api/v1/posts";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub posts: PostService,
    pub pagination: PaginationConfig,
}

impl AppState {
    #[must_use]
    pub fn new(posts: PostService, pagination: PaginationConfig) -> Self {
        Self { posts, pagination }
    }
}

/// Build the API router. Middleware (CORS, request logging) is layered on by
/// the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            POSTS_PATH,
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/v1/posts/:id",
            get(handlers::get_post).delete(handlers::delete_post),
        )
        .route("/api/v1/posts/:id/tags", patch(handlers::update_post_tags))
        .with_state(state)
}
