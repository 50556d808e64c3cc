use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use catalog_api::config::{AppConfig, LogFormat};
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_db::Backend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // --- Tracing ---
    // Held until the end of `main` so buffered file output is flushed.
    let _log_guard = init_tracing(&config).context("Failed to initialize logging")?;
    tracing::info!(
        environment = ?config.environment,
        host = %config.host,
        port = %config.port,
        log_file = ?config.log_file,
        "Loaded server configuration"
    );

    // --- Database ---
    let backend = Backend::from_url(&config.database_url)
        .context("DATABASE_URL must use a postgres:// or sqlite: scheme")?;

    let pool = catalog_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(?backend, "Database connection pool created");

    catalog_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    catalog_db::ensure_schema(&pool, backend)
        .await
        .context("Failed to create videos table")?;

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config).context("Invalid CORS configuration")?;

    // --- Start server ---
    let ip = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Console directives used when `RUST_LOG` is unset.
const CONSOLE_DIRECTIVES: &str = "catalog_api=info,catalog_db=info,tower_http=info";

/// Directives for the optional log file.
const FILE_DIRECTIVES: &str = "catalog_api=debug,catalog_db=debug,tower_http=debug";

/// Install the global subscriber.
///
/// The console layer logs at INFO (or `RUST_LOG`). When `LOG_FILE` is set a
/// second layer appends DEBUG output to that file through a non-blocking
/// writer; the returned guard flushes it and must live until shutdown.
fn init_tracing(config: &AppConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONSOLE_DIRECTIVES));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(match config.log_format {
        LogFormat::Pretty => fmt::layer().with_filter(console_filter).boxed(),
        LogFormat::Json => fmt::layer().json().with_filter(console_filter).boxed(),
    });

    let guard = match &config.log_file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)
                .with_context(|| format!("LOG_FILE has no file name: {}", path.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(FILE_DIRECTIVES))
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).init();
    Ok(guard)
}

/// Split a log path into the directory the appender writes to and the file
/// name. A bare file name lives in the working directory.
fn split_log_path(path: &Path) -> Option<(PathBuf, String)> {
    let file_name = path.file_name()?.to_str()?.to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((directory, file_name))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
