use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::server::structured_error::ApiError;
use crate::server::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
