//! Domain layer for the video catalog.
//!
//! Holds the error type, id/timestamp aliases, field limits and the
//! pagination rules shared by the repository and HTTP layers. No I/O lives
//! here.

pub mod error;
pub mod pagination;
pub mod types;
pub mod video;
