//! Handlers for the video catalog.
//!
//! Each handler runs its storage work inside one transaction: opened here,
//! passed to the repository, committed on success. An early return drops the
//! transaction, which rolls it back and hands the connection back to the
//! pool.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::pagination::{resolve_limit, resolve_offset};
use catalog_core::types::VideoId;
use catalog_core::video::VIDEO_ENTITY;
use catalog_db::models::video::{CreateVideo, UpdateVideo, VideoResponse};
use catalog_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: VideoId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: VIDEO_ENTITY,
        id,
    })
}

/// POST /api/v1/video/
///
/// Create a video. The id and timestamps are assigned by the server.
pub async fn create_video(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateVideo>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let video = VideoRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(video_id = %video.id, title = %video.title, "Video created");

    Ok(Json(VideoResponse::from(video)))
}

/// GET /api/v1/video/{id}
///
/// Retrieve a single video by id.
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<VideoId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let video = VideoRepo::find_by_id(&mut tx, &video_id)
        .await?
        .ok_or_else(|| not_found(video_id.clone()))?;
    tx.commit().await?;

    Ok(Json(VideoResponse::from(video)))
}

/// PUT /api/v1/video/{id}
///
/// Partially update a video. Fields left out of the body are untouched.
pub async fn update_video(
    State(state): State<AppState>,
    Path(video_id): Path<VideoId>,
    ValidatedJson(input): ValidatedJson<UpdateVideo>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let video = VideoRepo::update(&mut tx, &video_id, &input)
        .await?
        .ok_or_else(|| not_found(video_id.clone()))?;
    tx.commit().await?;

    tracing::info!(video_id = %video.id, "Video updated");

    Ok(Json(VideoResponse::from(video)))
}

/// DELETE /api/v1/video/{id}
///
/// Delete a video permanently and return it as it was before removal.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<VideoId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let video = VideoRepo::delete(&mut tx, &video_id)
        .await?
        .ok_or_else(|| not_found(video_id.clone()))?;
    tx.commit().await?;

    tracing::info!(video_id = %video.id, "Video deleted");

    Ok(Json(VideoResponse::from(video)))
}

/// GET /api/v1/video/?limit=&offset=
///
/// List videos in insertion order. An empty catalog is an empty page, not
/// an error.
pub async fn list_videos(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params?;
    let limit = resolve_limit(params.limit)?;
    let offset = resolve_offset(params.offset)?;

    let mut tx = state.pool.begin().await?;
    let page = VideoRepo::list(&mut tx, limit, offset).await?;
    tx.commit().await?;

    tracing::debug!(
        limit,
        offset,
        returned = page.data.len(),
        total_count = page.total_count,
        "Videos listed"
    );

    Ok(Json(page))
}
