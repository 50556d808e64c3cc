//! Video field limits, id generation and timestamp rules.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use uuid::Uuid;

use crate::types::{Timestamp, VideoId};

/// Entity name used in not-found errors.
pub const VIDEO_ENTITY: &str = "Video";

/// Maximum length of a video title, in characters.
pub const MAX_TITLE_LEN: u64 = 100;

/// Maximum length of a video description, in characters.
pub const MAX_DESCRIPTION_LEN: u64 = 500;

/// Generate a fresh video id (UUID v4, hyphenated).
pub fn new_video_id() -> VideoId {
    Uuid::new_v4().to_string()
}

/// Current time truncated to microseconds, the precision timestamps are
/// stored with.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// The `updated_date` to record for a mutation happening at `now`.
///
/// Always strictly after `previous`, even if the clock has not advanced
/// (or went backwards) since the last write.
pub fn next_updated_date(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Storage encoding of a timestamp: microseconds since the Unix epoch.
pub fn timestamp_to_micros(ts: Timestamp) -> i64 {
    ts.timestamp_micros()
}

/// Decode a stored timestamp. `None` if the value is out of range.
pub fn timestamp_from_micros(micros: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_micros(micros)
}
