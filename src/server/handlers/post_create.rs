use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::post::PostPayload;
use crate::server::structured_error::ApiError;
use crate::server::{AppState, POSTS_PATH};

/// Create a post. Responds `201 Created` with the stored post and a
/// `Location` header pointing at it.
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let post = state.posts.create(payload).await?;
    let location = format!("{POSTS_PATH}/{}", post.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(post),
    ))
}
