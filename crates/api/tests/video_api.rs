//! HTTP-level integration tests for the video catalog endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, against an in-memory SQLite database.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;

fn sample_video() -> serde_json::Value {
    json!({
        "title": "Test Video",
        "description": "A test video",
        "duration": 120,
    })
}

/// Create a video through the API and return its JSON representation.
async fn create(pool: &catalog_db::DbPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/video/", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_video_returns_record() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/video/", sample_video()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Test Video");
    assert_eq!(json["description"], "A test video");
    assert_eq!(json["duration"], 120);
    assert!(!json["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_video_response_has_only_record_fields() {
    let pool = common::test_pool().await;
    let json = create(&pool, sample_video()).await;

    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["description", "duration", "id", "title"]);
}

#[tokio::test]
async fn test_create_issues_distinct_ids() {
    let pool = common::test_pool().await;
    let first = create(&pool, sample_video()).await;
    let second = create(&pool, sample_video()).await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_create_ignores_caller_supplied_id() {
    let pool = common::test_pool().await;
    let json = create(
        &pool,
        json!({
            "id": "chosen-by-caller",
            "title": "Test Video",
            "description": "A test video",
            "duration": 120,
        }),
    )
    .await;

    assert_ne!(json["id"], "chosen-by-caller");
}

#[tokio::test]
async fn test_create_video_incomplete_payload_returns_422() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/video/",
        json!({"title": "Test Video", "description": "A test video"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_title_at_limit_is_accepted() {
    let pool = common::test_pool().await;
    let title = "a".repeat(100);

    let json = create(
        &pool,
        json!({"title": title, "description": "ok", "duration": 1}),
    )
    .await;

    assert_eq!(json["title"].as_str().unwrap().chars().count(), 100);
}

#[tokio::test]
async fn test_create_title_over_limit_is_rejected_and_not_persisted() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/video/",
        json!({"title": "a".repeat(101), "description": "ok", "duration": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["title"].is_array());

    let app = common::build_test_app(pool);
    let page = body_json(get(app, "/api/v1/video/").await).await;
    assert_eq!(page["total_count"], 0);
}

#[tokio::test]
async fn test_create_description_over_limit_is_rejected() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/video/",
        json!({"title": "ok", "description": "d".repeat(501), "duration": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["fields"]["description"].is_array());
}

#[tokio::test]
async fn test_create_with_non_integer_duration_returns_422() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/video/",
        json!({"title": "ok", "description": "ok", "duration": "long"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_video_returns_created_record() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/video/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_get_nonexistent_video_returns_404() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/video/99999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_video_changes_supplied_fields_only() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/video/{id}"),
        json!({"title": "Updated Video", "duration": 180}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], created["id"]);
    assert_eq!(json["title"], "Updated Video");
    assert_eq!(json["description"], "A test video");
    assert_eq!(json["duration"], 180);
}

#[tokio::test]
async fn test_update_duration_only() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/v1/video/{id}"), json!({"duration": 180})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/video/{id}")).await).await;
    assert_eq!(json["title"], "Test Video");
    assert_eq!(json["description"], "A test video");
    assert_eq!(json["duration"], 180);
}

#[tokio::test]
async fn test_update_with_empty_body_keeps_record() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/video/{id}"), json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_update_with_null_field_returns_422() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/v1/video/{id}"), json!({"title": null})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/video/{id}")).await).await;
    assert_eq!(json["title"], "Test Video");
}

#[tokio::test]
async fn test_update_title_over_limit_returns_422() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/video/{id}"),
        json!({"title": "t".repeat(101)}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_nonexistent_video_returns_404() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/video/99999",
        json!({"title": "Updated Video", "duration": 180}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_video_returns_deleted_record() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/video/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/video/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice_returns_404() {
    let pool = common::test_pool().await;
    let created = create(&pool, sample_video()).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    delete(app, &format!("/api/v1/video/{id}")).await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/video/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_video_returns_404() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = delete(app, "/api/v1/video/99999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_videos() {
    let pool = common::test_pool().await;
    create(
        &pool,
        json!({"title": "Video 1", "description": "Description 1", "duration": 120}),
    )
    .await;
    create(
        &pool,
        json!({"title": "Video 2", "description": "Description 2", "duration": 180}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/video/?limit=10&offset=0").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["total_count"], 2);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["data"][0]["title"], "Video 1");
    assert_eq!(json["data"][1]["title"], "Video 2");
}

#[tokio::test]
async fn test_list_uses_default_pagination() {
    let pool = common::test_pool().await;
    for i in 0..12 {
        create(
            &pool,
            json!({"title": format!("Video {i}"), "description": "d", "duration": i}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/video/").await).await;

    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["limit"], 10);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["total_count"], 12);
}

#[tokio::test]
async fn test_list_without_trailing_slash() {
    let pool = common::test_pool().await;
    create(&pool, sample_video()).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/video").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_count"], 1);
}

#[tokio::test]
async fn test_list_past_the_end_returns_empty_data_with_total() {
    let pool = common::test_pool().await;
    create(&pool, sample_video()).await;
    create(&pool, sample_video()).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/video/?limit=5&offset=2").await).await;

    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["total_count"], 2);
}

#[tokio::test]
async fn test_list_limit_larger_than_store_returns_remainder() {
    let pool = common::test_pool().await;
    for _ in 0..3 {
        create(&pool, sample_video()).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/video/?limit=1000&offset=1").await).await;

    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["limit"], 1000);
    assert_eq!(json["total_count"], 3);
}

#[tokio::test]
async fn test_list_empty_catalog_returns_empty_page() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/video/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({"data": [], "offset": 0, "limit": 10, "total_count": 0})
    );
}

#[tokio::test]
async fn test_list_negative_limit_returns_422() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/video/?limit=-1").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_non_numeric_offset_returns_422() {
    let pool = common::test_pool().await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/video/?offset=abc").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_total_count_tracks_deletes() {
    let pool = common::test_pool().await;
    let first = create(&pool, sample_video()).await;
    create(&pool, sample_video()).await;

    let app = common::build_test_app(pool.clone());
    let id = first["id"].as_str().unwrap();
    delete(app, &format!("/api/v1/video/{id}")).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/video/").await).await;
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
