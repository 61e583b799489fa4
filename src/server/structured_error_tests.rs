use super::*;

#[test]
fn test_structured_error_json_format() {
    let se = StructuredError::new(vec!["Post not found: 3".to_string()]).with_code("POST_NOT_FOUND");
    let parsed = serde_json::to_value(&se).unwrap();
    assert_eq!(parsed["errors"][0], "Post not found: 3");
    assert_eq!(parsed["code"], "POST_NOT_FOUND");
    assert!(parsed.get("tip").is_none());
}

#[test]
fn test_structured_error_plain_errors_only() {
    let se = StructuredError::new(vec!["Title cannot be empty".to_string()]);
    let json = serde_json::to_string(&se).unwrap();
    assert_eq!(json, r#"{"errors":["Title cannot be empty"]}"#);
}

#[test]
fn test_to_structured_error_includes_tip() {
    let err = PostError::from(TagError::Conflict("java".to_string()));
    let se = to_structured_error(&err);
    assert_eq!(se.code.as_deref(), Some("TAG_CONFLICT"));
    assert!(se.tip.is_some());
    assert_eq!(se.errors.len(), 1);
}

#[test]
fn test_status_codes() {
    assert_eq!(
        PostError::NotFound(1).into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        PostError::ValidationFailed(vec!["x".to_string()])
            .into_response()
            .status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        PostError::from(TagError::Conflict("x".to_string()))
            .into_response()
            .status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        PostError::Database(sqlx::Error::PoolClosed)
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
