//! Reload endpoint and the watch loop
//!
//! Routes:
//! - `GET /` serves the most recently written deck
//! - `GET /__reload` returns `{"lastModified": <stamp>}`
//!
//! CORS is permissive so a deck opened straight from disk (`file://`) can
//! still poll the endpoint.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::regenerate::{Regenerator, ReloadStamp};
use crate::watch::{FileWatcher, WatchConfig, WatchEvent};

/// Path polled by the reload script.
pub const RELOAD_PATH: &str = "/__reload";

/// Where to listen and how long to debounce.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub debounce_ms: u64,
}

/// Full URL of the reload endpoint for a given bind address.
///
/// IPv6 literals are bracketed. A wildcard bind address (`0.0.0.0`, `::`)
/// is reported as loopback.
pub fn reload_url(host: &str, port: u16) -> String {
    let host = match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) if ip.is_unspecified() => Ipv4Addr::LOCALHOST.to_string(),
        Ok(IpAddr::V6(ip)) if ip.is_unspecified() => format!("[{}]", Ipv6Addr::LOCALHOST),
        Ok(IpAddr::V6(ip)) => format!("[{ip}]"),
        _ => host.to_string(),
    };
    format!("http://{host}:{port}{RELOAD_PATH}")
}

/// Shared state handed to every request.
#[derive(Clone)]
pub struct ServerState {
    stamp: Arc<ReloadStamp>,
    deck_path: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(stamp: Arc<ReloadStamp>, deck_path: impl Into<PathBuf>) -> Self {
        Self {
            stamp,
            deck_path: Arc::new(deck_path.into()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReloadStatus {
    last_modified: u64,
}

async fn reload_status(State(state): State<ServerState>) -> Json<ReloadStatus> {
    Json(ReloadStatus {
        last_modified: state.stamp.get(),
    })
}

async fn serve_deck(State(state): State<ServerState>) -> Response {
    match tokio::fs::read_to_string(state.deck_path.as_path()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            debug!(error = %err, path = %state.deck_path.display(), "Deck not readable");
            (StatusCode::NOT_FOUND, "Deck not generated yet").into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Build the axum router
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(serve_deck))
        .route(RELOAD_PATH, get(reload_status))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build once, then rebuild on every source change while serving the reload
/// endpoint. Returns after Ctrl-C.
///
/// Changes are handled one at a time, so two rebuilds never overlap. A failed
/// rebuild is logged and the loop keeps waiting for the next change.
pub async fn run_watch(regenerator: Regenerator, config: ServeConfig) -> Result<()> {
    let regenerator = Arc::new(regenerator);
    let stamp = Arc::new(ReloadStamp::new());

    let mut watcher = FileWatcher::new(
        regenerator.input(),
        WatchConfig {
            debounce_ms: config.debounce_ms,
        },
    )?;

    rebuild(&regenerator, &stamp).await;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        %addr,
        reload = %reload_url(&config.host, config.port),
        source = %regenerator.input().display(),
        "Watching deck"
    );

    let router = build_router(ServerState::new(
        Arc::clone(&stamp),
        regenerator.output(),
    ));
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    loop {
        tokio::select! {
            event = watcher.recv() => match event {
                Some(WatchEvent::Modified(path)) => {
                    debug!(path = %path.display(), "Rebuilding");
                    rebuild(&regenerator, &stamp).await;
                }
                None => {
                    warn!("Filesystem watcher stopped");
                    break;
                }
            },
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    warn!(error = %err, "Failed to listen for Ctrl-C");
                }
                info!("Shutting down");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    server
        .await
        .map_err(|e| Error::Server(e.to_string()))?
        .map_err(|e| Error::Server(e.to_string()))?;

    Ok(())
}

async fn rebuild(regenerator: &Arc<Regenerator>, stamp: &Arc<ReloadStamp>) {
    let regenerator = Arc::clone(regenerator);
    let stamp = Arc::clone(stamp);
    if let Err(err) = tokio::task::spawn_blocking(move || regenerator.rebuild(&stamp)).await {
        warn!(error = %err, "Regeneration task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn state_for(path: PathBuf) -> (Arc<ReloadStamp>, ServerState) {
        let stamp = Arc::new(ReloadStamp::new());
        let state = ServerState::new(Arc::clone(&stamp), path);
        (stamp, state)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_reload_url() {
        assert_eq!(
            reload_url("127.0.0.1", 3000),
            "http://127.0.0.1:3000/__reload"
        );
        assert_eq!(reload_url("localhost", 8080), "http://localhost:8080/__reload");
    }

    #[test]
    fn test_reload_url_brackets_ipv6() {
        assert_eq!(reload_url("::1", 3000), "http://[::1]:3000/__reload");
        assert_eq!(
            reload_url("fe80::2", 3000),
            "http://[fe80::2]:3000/__reload"
        );
    }

    #[test]
    fn test_reload_url_maps_wildcard_to_loopback() {
        assert_eq!(reload_url("0.0.0.0", 3000), "http://127.0.0.1:3000/__reload");
        assert_eq!(reload_url("::", 3000), "http://[::1]:3000/__reload");
    }

    #[tokio::test]
    async fn test_reload_endpoint_reports_stamp() {
        let (stamp, state) = state_for(PathBuf::from("unused.html"));
        let expected = stamp.bump();

        let response = build_router(state)
            .oneshot(Request::get(RELOAD_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["lastModified"], expected);
    }

    #[tokio::test]
    async fn test_reload_endpoint_allows_any_origin() {
        let (_, state) = state_for(PathBuf::from("unused.html"));

        let response = build_router(state)
            .oneshot(
                Request::get(RELOAD_PATH)
                    .header(header::ORIGIN, "null")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&header::HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn test_root_serves_generated_deck() {
        let dir = tempdir().unwrap();
        let deck = dir.path().join("talk.html");
        std::fs::write(&deck, "<!DOCTYPE html><p>deck</p>").unwrap();
        let (_, state) = state_for(deck);

        let response = build_router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<!DOCTYPE html><p>deck</p>");
    }

    #[tokio::test]
    async fn test_root_before_first_build_is_not_found() {
        let dir = tempdir().unwrap();
        let (_, state) = state_for(dir.path().join("missing.html"));

        let response = build_router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (_, state) = state_for(PathBuf::from("unused.html"));

        let response = build_router(state)
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
