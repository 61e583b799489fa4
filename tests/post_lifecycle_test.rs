#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

mod common;

use blog_api::pagination::{PageRequest, Sort};
use blog_api::post::{PostError, PostPayload};
use blog_api::tag::{TagError, TagInput};
use common::{create_file_service, create_post, create_test_service, tag_names};

// ============ Create Tests ============

#[tokio::test]
async fn test_create_returns_persisted_post() {
    let service = create_test_service().await;
    let post = service
        .create(PostPayload::new("Hello", "World").with_tags(["Rust", "Web"]))
        .await
        .unwrap();

    let stored = service.find_by_id(post.id).await.unwrap();
    assert_eq!(stored, post);
    assert_eq!(tag_names(&stored), vec!["rust", "web"]);
}

#[tokio::test]
async fn test_create_with_duplicate_tag_names_collapses_them() {
    let service = create_test_service().await;
    let post = create_post(&service, "Dup", &["java", "Java", " JAVA "]).await;
    assert_eq!(tag_names(&post), vec!["java"]);
}

#[tokio::test]
async fn test_create_with_empty_title_fails_validation() {
    let service = create_test_service().await;
    let err = service
        .create(PostPayload::new("", "Body"))
        .await
        .unwrap_err();

    match err {
        PostError::ValidationFailed(messages) => {
            assert_eq!(messages, vec!["Title cannot be empty".to_string()]);
        }
        other => panic!("expected ValidationFailed, got {other}"),
    }
}

#[tokio::test]
async fn test_create_reports_every_violation() {
    let service = create_test_service().await;
    let err = service
        .create(PostPayload::new("  ", "\n").with_tags(["ok", " "]))
        .await
        .unwrap_err();

    let PostError::ValidationFailed(messages) = err else {
        panic!("expected ValidationFailed");
    };
    assert_eq!(
        messages,
        vec![
            "Post content cannot be empty".to_string(),
            "Tag name cannot be empty".to_string(),
            "Title cannot be empty".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failed_create_leaves_no_tags_behind() {
    let service = create_test_service().await;
    let result = service
        .create(PostPayload::new("", "Body").with_tags(["ghost"]))
        .await;
    assert!(result.is_err());

    let mut conn = service.pool().acquire().await.unwrap();
    let ghost = blog_api::storage::tags::find_by_name(&mut conn, "ghost").await.unwrap();
    assert!(ghost.is_none());
}

// ============ Read Tests ============

#[tokio::test]
async fn test_find_by_id_unknown_is_not_found() {
    let service = create_test_service().await;
    let err = service.find_by_id(999).await.unwrap_err();
    assert!(matches!(err, PostError::NotFound(999)));
}

#[tokio::test]
async fn test_find_all_pages_and_counts() {
    let service = create_test_service().await;
    for i in 0..5 {
        create_post(&service, &format!("Post {i}"), &[]).await;
    }

    let page = service.find_all(&PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages(), 3);
    let titles: Vec<&str> = page.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 2", "Post 3"]);

    let beyond = service.find_all(&PageRequest::new(10, 2)).await.unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.total_elements, 5);
}

#[tokio::test]
async fn test_find_all_sorted_by_title_desc() {
    let service = create_test_service().await;
    create_post(&service, "b", &[]).await;
    create_post(&service, "c", &[]).await;
    create_post(&service, "a", &[]).await;

    let request = PageRequest::new(0, 10).with_sort(Sort::parse("title,desc"));
    let page = service.find_all(&request).await.unwrap();
    let titles: Vec<&str> = page.content.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn test_find_all_includes_tags() {
    let service = create_test_service().await;
    create_post(&service, "Tagged", &["one", "two"]).await;

    let page = service.find_all(&PageRequest::default()).await.unwrap();
    assert_eq!(tag_names(&page.content[0]), vec!["one", "two"]);
}

// ============ Update Tags Tests ============

#[tokio::test]
async fn test_update_tags_with_equivalent_set_returns_unchanged_post() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &["a", "b"]).await;

    let result = service
        .update_tags(post.id, vec![TagInput::new("B"), TagInput::new(" a")])
        .await
        .unwrap();
    assert_eq!(result, post);
    assert_eq!(result.tags, post.tags);
}

#[tokio::test]
async fn test_update_tags_adds_new_tags() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &["a"]).await;

    let updated = service
        .update_tags(post.id, vec![TagInput::new("a"), TagInput::new("new")])
        .await
        .unwrap();
    assert_eq!(tag_names(&updated), vec!["a", "new"]);
    assert_eq!(service.find_by_id(post.id).await.unwrap().tags, updated.tags);
}

#[tokio::test]
async fn test_update_tags_to_empty_clears_post() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &["a"]).await;

    let updated = service.update_tags(post.id, Vec::new()).await.unwrap();
    assert!(updated.tags.is_empty());
    assert!(service.find_by_id(post.id).await.unwrap().tags.is_empty());
}

#[tokio::test]
async fn test_update_tags_blank_name_fails_validation() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &["a"]).await;

    let err = service
        .update_tags(post.id, vec![TagInput::new("")])
        .await
        .unwrap_err();
    let PostError::ValidationFailed(messages) = err else {
        panic!("expected ValidationFailed");
    };
    assert_eq!(messages, vec!["Tag name cannot be empty".to_string()]);
    assert_eq!(tag_names(&service.find_by_id(post.id).await.unwrap()), vec!["a"]);
}

#[tokio::test]
async fn test_update_tags_unknown_post_is_not_found() {
    let service = create_test_service().await;
    let err = service
        .update_tags(5, vec![TagInput::new("x")])
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::NotFound(5)));
}

// ============ Delete Tests ============

#[tokio::test]
async fn test_delete_removes_post() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &["a"]).await;

    service.delete(post.id).await.unwrap();
    assert!(matches!(
        service.find_by_id(post.id).await,
        Err(PostError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let service = create_test_service().await;
    let post = create_post(&service, "P", &[]).await;

    service.delete(post.id).await.unwrap();
    assert!(matches!(
        service.delete(post.id).await,
        Err(PostError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_post_ids_are_not_reused() {
    let service = create_test_service().await;
    let first = create_post(&service, "P", &[]).await;
    service.delete(first.id).await.unwrap();

    let second = create_post(&service, "Q", &[]).await;
    assert!(second.id > first.id);
}

// ============ Concurrency Tests ============

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tag_updates_on_file_database_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let service = create_file_service(dir.path()).await;

    let mut posts = Vec::new();
    for i in 0..8 {
        posts.push(create_post(&service, &format!("P{i}"), &["old"]).await);
    }

    let handles: Vec<_> = posts
        .iter()
        .map(|post| {
            let service = service.clone();
            let id = post.id;
            tokio::spawn(async move {
                service
                    .update_tags(id, vec![TagInput::new(format!("new-{id}")), TagInput::new("shared")])
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for post in &posts {
        let stored = service.find_by_id(post.id).await.unwrap();
        let mut names = tag_names(&stored);
        names.sort();
        assert_eq!(names, vec![format!("new-{}", post.id), "shared".to_string()]);
    }

    // Every post dropped "old", so the last update reclaimed it.
    let mut conn = service.pool().acquire().await.unwrap();
    assert!(blog_api::storage::tags::find_by_name(&mut conn, "old").await.unwrap().is_none());
    drop(conn);
    service.pool().close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_share_new_tag() {
    let dir = tempfile::tempdir().unwrap();
    let service = create_file_service(dir.path()).await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(PostPayload::new(format!("P{i}"), "Body").with_tags(["Fresh"]))
                    .await
            })
        })
        .collect();

    let mut tag_ids = Vec::new();
    for handle in handles {
        let post = handle.await.unwrap().unwrap();
        tag_ids.push(post.tags.iter().next().unwrap().id);
    }
    tag_ids.dedup();
    assert_eq!(tag_ids.len(), 1);
    service.pool().close().await;
}

#[test]
fn test_tag_errors_convert_into_post_errors() {
    let err: PostError = TagError::InvalidTagName("x".to_string()).into();
    assert!(matches!(err, PostError::Tag(TagError::InvalidTagName(_))));
}
