//! Persistence layer for the video catalog.
//!
//! Runs on sqlx's `Any` driver so the same queries serve PostgreSQL in
//! production and an embedded SQLite database in test mode.

use std::time::Duration;

use sqlx::any::AnyPoolOptions;

pub mod models;
pub mod repositories;
pub mod schema;

pub type DbPool = sqlx::AnyPool;

/// A single connection or an open transaction (`&mut *tx`).
pub type DbConn = sqlx::AnyConnection;

/// Database engines the catalog can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Pick the backend from a connection string's scheme.
    pub fn from_url(database_url: &str) -> Option<Self> {
        let scheme = database_url.split(':').next()?;
        match scheme {
            "postgres" | "postgresql" => Some(Backend::Postgres),
            "sqlite" => Some(Backend::Sqlite),
            _ => None,
        }
    }
}

/// Whether the URL points at a private in-memory SQLite database.
///
/// Every connection to such a URL opens a fresh, empty database, so the pool
/// must hold on to exactly one connection for the data to survive.
fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let options = if is_in_memory_sqlite(database_url) {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        AnyPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
    };

    options.connect(database_url).await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `videos` table and its index if they do not exist yet.
pub async fn ensure_schema(pool: &DbPool, backend: Backend) -> Result<(), sqlx::Error> {
    let create_table = schema::create_videos_table(backend);
    sqlx::query(&create_table).execute(pool).await?;
    sqlx::query(schema::CREATE_VIDEOS_TITLE_INDEX)
        .execute(pool)
        .await?;
    tracing::debug!(?backend, "Videos schema ensured");
    Ok(())
}
