#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL shell code,
//! not mock implementations: the same state wiring and the same merged
//! router as `main.rs`.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use portico_shell::config::Config;
use portico_shell::routes;
use portico_shell::state::AppState;

static NEXT_FIXTURE: AtomicUsize = AtomicUsize::new(0);

/// Write a manifest document to a unique temp file, returning its path.
pub fn write_manifest(manifest: &serde_json::Value) -> PathBuf {
    let n = NEXT_FIXTURE.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "portico-test-{}-{n}.manifest.json",
        std::process::id()
    ));
    std::fs::write(&path, serde_json::to_vec_pretty(manifest).unwrap()).unwrap();
    path
}

/// Config pointing at a manifest file, with no discovery endpoint.
pub fn test_config(manifest_path: PathBuf) -> Config {
    Config {
        port: 0,
        discovery_url: None,
        discovery_timeout: Duration::from_secs(2),
        manifest_path,
        seed_manifest_path: None,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

/// Test application wrapper using the REAL shell routes and state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Build an app whose only manifest source is the given document,
    /// resolved eagerly like the production bootstrap.
    pub async fn with_manifest(manifest: serde_json::Value) -> Self {
        let path = write_manifest(&manifest);
        let state = AppState::new(&test_config(path))
            .await
            .expect("failed to initialize AppState");

        state
            .federation()
            .resolve()
            .await
            .expect("failed to resolve test manifest");
        state.menu().initialize().await;

        Self::from_state(state)
    }

    /// Build an app whose manifest sources will all fail.
    pub async fn with_missing_manifest() -> Self {
        let path = PathBuf::from("/nonexistent/portico.manifest.json");
        let state = AppState::new(&test_config(path))
            .await
            .expect("failed to initialize AppState");

        Self::from_state(state)
    }

    /// Build the REAL router over existing state (must match main.rs).
    pub fn from_state(state: AppState) -> Self {
        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::federation::router())
            .merge(routes::menu::router())
            .merge(routes::resolve::router())
            .with_state(state.clone());

        Self { router, state }
    }

    /// GET a path, returning the status and the parsed JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }
}

/// Serve a JSON document over local HTTP, returning the document URL.
pub async fn serve_json(document: serde_json::Value) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/document.json",
        get(move || {
            let document = document.clone();
            async move { axum::Json(document) }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/document.json")
}

/// A URL on a port nothing is listening on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/manifest.json")
}
