use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::post::Post;
use crate::server::structured_error::ApiError;
use crate::server::AppState;
use crate::tag::TagInput;

pub async fn update_post_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    tags: Result<Json<Vec<TagInput>>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Json(tags) = tags?;
    Ok(Json(state.posts.update_tags(id, tags).await?))
}
