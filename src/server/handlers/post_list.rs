use axum::extract::{Query, State};
use axum::http::HeaderName;
use axum::response::IntoResponse;
use axum::Json;

use crate::pagination::PageRequest;
use crate::server::structured_error::ApiError;
use crate::server::AppState;

/// Response header carrying the total number of matching posts.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Listing parameters. `tag` may repeat and each value may hold a
/// comma-separated list; the last `page`, `size` or `sort` wins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub tags: Vec<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tag" => params
                    .tags
                    .extend(value.split(',').map(str::to_string)),
                "page" => params.page = Some(value),
                "size" => params.size = Some(value),
                "sort" => params.sort = Some(value),
                _ => {}
            }
        }
        params
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let params = ListParams::from_pairs(pairs);
    let page = PageRequest::from_params(
        params.page.as_deref(),
        params.size.as_deref(),
        params.sort.as_deref(),
        &state.pagination,
    );

    let posts = if params.tags.is_empty() {
        state.posts.find_all(&page).await?
    } else {
        state.posts.find_by_tags(&params.tags, &page).await?
    };

    Ok((
        [(TOTAL_COUNT_HEADER, posts.total_elements.to_string())],
        Json(posts.content),
    ))
}
