//! Video models and DTOs.
//!
//! Covers the stored row, the create/update payloads with their structural
//! validation, and the record/page shapes returned to callers.

use catalog_core::types::{Timestamp, VideoId};
use catalog_core::video::{
    next_updated_date, timestamp_from_micros, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `videos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub duration: i64,
    pub created_date: Timestamp,
    pub updated_date: Timestamp,
}

impl Video {
    /// Apply the fields present in `patch` and refresh `updated_date`.
    ///
    /// Fields absent from the patch keep their current value.
    pub fn apply(&mut self, patch: &UpdateVideo, now: Timestamp) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        self.updated_date = next_updated_date(self.updated_date, now);
    }
}

fn timestamp_column(row: &AnyRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let micros: i64 = row.try_get(column)?;
    timestamp_from_micros(micros).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("timestamp out of range: {micros}").into(),
    })
}

impl<'r> FromRow<'r, AnyRow> for Video {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            duration: row.try_get("duration")?,
            created_date: timestamp_column(row, "created_date")?,
            updated_date: timestamp_column(row, "updated_date")?,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a new video. Every field is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVideo {
    #[validate(length(max = MAX_TITLE_LEN, message = "must be at most 100 characters"))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LEN, message = "must be at most 500 characters"))]
    pub description: String,
    pub duration: i64,
}

/// DTO for partially updating a video.
///
/// A missing field leaves the stored value alone. An explicit `null` is a
/// type error, since none of these columns can be null.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVideo {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = MAX_TITLE_LEN, message = "must be at most 100 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = MAX_DESCRIPTION_LEN, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<i64>,
}

/// Deserialize a field that is only ever called when the key is present,
/// so `null` is handed to `T` and rejected there.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A video as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub duration: i64,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            duration: video.duration,
        }
    }
}

/// One window of videos plus the total number stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPage {
    pub data: Vec<VideoResponse>,
    pub offset: i64,
    pub limit: i64,
    pub total_count: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
