//! Process bootstrap for the HTTP server.
//!
//! Opens the store, retries schema creation a bounded number of times,
//! assembles the router and serves it until the shutdown token fires.

mod bootstrap;

pub use bootstrap::{prepare_store, SchemaStatus};

use std::path::Path;

use axum::Router;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::storage::SqliteStore;

/// Assemble the full application: API routes, optional static bundle at `/`,
/// request tracing and permissive CORS.
pub fn build_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = api::router(state);

    if let Some(dir) = static_dir {
        if dir.is_dir() {
            info!(dir = %dir.display(), "Serving static files");
            app = app.fallback_service(ServeDir::new(dir));
        }
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// Run the server until `shutdown` is cancelled.
pub async fn serve(config: ServerConfig, shutdown: CancellationToken) -> Result<()> {
    let store = SqliteStore::open(&config.database_path)?;
    info!(path = %store.path().display(), "Opened note store");

    let status = prepare_store(&store, config.startup_retries, config.retry_delay, &shutdown).await;
    if status == SchemaStatus::Cancelled {
        info!("Shutdown requested during startup");
        return Ok(());
    }

    let app = build_app(AppState::new(store), config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("NotepadPro listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Cancel `token` when the process receives Ctrl-C.
pub fn shutdown_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl-C, shutting down"),
            Err(e) => tracing::warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
        token.cancel();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt; // oneshot

    fn test_state(tmp: &TempDir) -> AppState {
        let store = SqliteStore::open(&tmp.path().join("notes.db")).unwrap();
        store.init_schema().unwrap();
        AppState::new(store)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_static_bundle_served_at_root() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("index.html"), "<h1>NotepadPro</h1>").unwrap();

        let app = build_app(test_state(&tmp), Some(&static_dir));

        let (status, body) = get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("NotepadPro"));

        // API routes still win over the static fallback.
        let (status, body) = get(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_missing_static_dir_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let app = build_app(test_state(&tmp), Some(&tmp.path().join("does-not-exist")));

        let (status, _) = get(app, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let tmp = TempDir::new().unwrap();
        let app = build_app(test_state(&tmp), None);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_cancelled_token() {
        let tmp = TempDir::new().unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: tmp.path().join("notes.db"),
            static_dir: None,
            startup_retries: 1,
            retry_delay: Duration::from_millis(10),
        };

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(serve(config, shutdown.clone()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server should stop after cancellation")
            .unwrap();
        assert!(result.is_ok());
        assert!(tmp.path().join("notes.db").exists());
    }
}
