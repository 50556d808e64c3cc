//! Route definitions for the video catalog.
//!
//! Mounted under `/api/v1`. The collection answers with and without the
//! trailing slash.
//!
//! ```text
//! GET    /video/          list_videos (?limit=&offset=)
//! POST   /video/          create_video
//! GET    /video/{id}      get_video
//! PUT    /video/{id}      update_video
//! DELETE /video/{id}      delete_video
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/video/",
            get(video::list_videos).post(video::create_video),
        )
        .route(
            "/video",
            get(video::list_videos).post(video::create_video),
        )
        .route(
            "/video/{id}",
            get(video::get_video)
                .put(video::update_video)
                .delete(video::delete_video),
        )
}
