/// Video ids are UUID-v4 strings, stored as TEXT.
pub type VideoId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
