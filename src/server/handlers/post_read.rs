use axum::extract::{Path, State};
use axum::Json;

use crate::post::Post;
use crate::server::structured_error::ApiError;
use crate::server::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.find_by_id(id).await?))
}
