use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::post::PostError;
use crate::server::error_mapping::ToStructuredError;
use crate::tag::TagError;

/// JSON error body. Validation failures carry one entry per violation.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl StructuredError {
    #[must_use]
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            errors,
            code: None,
            tip: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }
}

/// Convert a domain error into a single-message structured error.
#[must_use]
pub fn to_structured_error<E: ToStructuredError + Display>(err: &E) -> StructuredError {
    let (code, tip) = err.error_code_and_tip();
    let mut se = StructuredError::new(vec![err.to_string()]).with_code(code);
    if let Some(tip) = tip {
        se = se.with_tip(tip);
    }
    se
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Json(#[from] JsonRejection),
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Self::ValidationFailed(messages) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(StructuredError::new(messages.clone())),
            )
                .into_response(),
            Self::Tag(TagError::InvalidTagName(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(to_structured_error(&self))).into_response()
            }
            Self::Tag(TagError::Conflict(_)) => {
                (StatusCode::CONFLICT, Json(to_structured_error(&self))).into_response()
            }
            Self::Tag(TagError::Database(_)) | Self::Database(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(to_structured_error(&self)))
                    .into_response()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Post(e) => e.into_response(),
            Self::Json(rejection) => (
                rejection.status(),
                Json(StructuredError::new(vec![rejection.body_text()])),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
#[path = "structured_error_tests.rs"]
mod structured_error_tests;
