//! DDL for the `videos` table.
//!
//! Timestamps are BIGINT microseconds since the epoch. `seq` records
//! insertion order and is the listing order; it never leaves the database.

use catalog_core::video::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};

use crate::Backend;

/// `CREATE TABLE` statement for `backend`, with the field limits enforced
/// at rest as `CHECK` constraints.
pub fn create_videos_table(backend: Backend) -> String {
    let (seq, char_len) = match backend {
        Backend::Postgres => ("BIGSERIAL PRIMARY KEY", "char_length"),
        Backend::Sqlite => ("INTEGER PRIMARY KEY AUTOINCREMENT", "length"),
    };
    format!(
        "CREATE TABLE IF NOT EXISTS videos ( \
             seq          {seq}, \
             id           TEXT NOT NULL UNIQUE, \
             title        TEXT NOT NULL CHECK ({char_len}(title) <= {MAX_TITLE_LEN}), \
             description  TEXT NOT NULL CHECK ({char_len}(description) <= {MAX_DESCRIPTION_LEN}), \
             duration     BIGINT NOT NULL, \
             created_date BIGINT NOT NULL, \
             updated_date BIGINT NOT NULL CHECK (updated_date >= created_date), \
             is_active    BOOLEAN NOT NULL DEFAULT TRUE \
         )"
    )
}

pub const CREATE_VIDEOS_TITLE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_videos_title ON videos (title)";
