pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /video/                                          list, create
/// /video/{id}                                      get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(video::router())
}
