use crate::post::PostError;
use crate::tag::TagError;

/// Trait for mapping domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

impl ToStructuredError for TagError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            TagError::Database(_) => ("DATABASE_ERROR", None),
            TagError::InvalidTagName(_) => (
                "INVALID_TAG_NAME",
                Some("Tag names need at least one non-whitespace character"),
            ),
            TagError::Conflict(_) => (
                "TAG_CONFLICT",
                Some("Another request created the same tag; retry the request"),
            ),
        }
    }
}

impl ToStructuredError for PostError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            PostError::NotFound(_) => ("POST_NOT_FOUND", None),
            PostError::ValidationFailed(_) => ("VALIDATION_FAILED", None),
            PostError::Tag(e) => e.error_code_and_tip(),
            PostError::Database(_) => ("DATABASE_ERROR", None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_error_codes() {
        assert_eq!(PostError::NotFound(1).error_code_and_tip().0, "POST_NOT_FOUND");
        assert_eq!(
            PostError::ValidationFailed(vec![]).error_code_and_tip().0,
            "VALIDATION_FAILED"
        );
        assert_eq!(
            PostError::Database(sqlx::Error::RowNotFound).error_code_and_tip(),
            ("DATABASE_ERROR", None)
        );
    }

    #[test]
    fn test_tag_errors_keep_their_codes_through_post_error() {
        let err = PostError::from(TagError::Conflict("java".to_string()));
        let (code, tip) = err.error_code_and_tip();
        assert_eq!(code, "TAG_CONFLICT");
        assert!(tip.is_some());

        let err = PostError::from(TagError::InvalidTagName("blank".to_string()));
        assert_eq!(err.error_code_and_tip().0, "INVALID_TAG_NAME");

        let err = PostError::from(TagError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.error_code_and_tip().0, "DATABASE_ERROR");
    }
}
