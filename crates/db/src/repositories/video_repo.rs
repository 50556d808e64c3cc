//! Repository for the `videos` table.
//!
//! Every method takes the connection to run on, normally `&mut *tx` for a
//! transaction the caller opened, so one request's read-then-write shares a
//! single transaction. Missing rows come back as `None`; storage errors are
//! returned untouched.

use catalog_core::pagination::window_len;
use catalog_core::video::{new_video_id, now, timestamp_to_micros};

use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoPage, VideoResponse};
use crate::DbConn;

/// Column list for `videos` queries.
const COLUMNS: &str = "id, title, description, duration, created_date, updated_date";

/// Provides data access for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video with a fresh id and timestamps.
    pub async fn create(conn: &mut DbConn, dto: &CreateVideo) -> Result<Video, sqlx::Error> {
        let created = timestamp_to_micros(now());
        let query = format!(
            "INSERT INTO videos (id, title, description, duration, created_date, updated_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(new_video_id())
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.duration)
            .bind(created)
            .bind(created)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a video by its id.
    pub async fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Apply a partial update.
    ///
    /// Returns `None` if the video does not exist, in which case nothing is
    /// written. A row removed between the read and the write also yields
    /// `None`.
    pub async fn update(
        conn: &mut DbConn,
        id: &str,
        dto: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let Some(mut video) = Self::find_by_id(conn, id).await? else {
            return Ok(None);
        };
        video.apply(dto, now());

        let query = format!(
            "UPDATE videos SET \
                 title = $2, \
                 description = $3, \
                 duration = $4, \
                 updated_date = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.duration)
            .bind(timestamp_to_micros(video.updated_date))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a video permanently.
    ///
    /// Returns the row as it was just before removal, or `None` if there was
    /// no such video.
    pub async fn delete(conn: &mut DbConn, id: &str) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("DELETE FROM videos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Count all stored videos.
    pub async fn count(conn: &mut DbConn) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos")
            .fetch_one(&mut *conn)
            .await
    }

    /// List one window of videos in insertion order, with the total count.
    ///
    /// `limit` and `offset` must already be resolved (non-negative).
    pub async fn list(conn: &mut DbConn, limit: i64, offset: i64) -> Result<VideoPage, sqlx::Error> {
        let total_count = Self::count(conn).await?;

        let videos = if window_len(total_count, limit, offset) == 0 {
            Vec::new()
        } else {
            let query = format!("SELECT {COLUMNS} FROM videos ORDER BY seq LIMIT $1 OFFSET $2");
            sqlx::query_as::<_, Video>(&query)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut *conn)
                .await?
        };

        Ok(VideoPage {
            data: videos.into_iter().map(VideoResponse::from).collect(),
            offset,
            limit,
            total_count,
        })
    }
}
