//! Federation manifest route handlers.
//!
//! Expose the resolved manifest and per-remote metadata to the shell
//! frontend. All handlers resolve on demand; 503 when no manifest could be
//! obtained from any source.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::federation::{FederationManifest, RemoteDescriptor, RemoteMetadata};
use crate::state::AppState;

async fn get_manifest(State(state): State<AppState>) -> AppResult<Json<FederationManifest>> {
    let manifest = state
        .federation()
        .resolve()
        .await
        .map_err(|_| AppError::ManifestUnavailable)?;

    Ok(Json((*manifest).clone()))
}

async fn list_remotes(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, RemoteDescriptor>>> {
    state
        .federation()
        .resolve()
        .await
        .map_err(|_| AppError::ManifestUnavailable)?;

    Ok(Json(state.federation().all_remotes()))
}

async fn get_remote(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<RemoteMetadata>> {
    state
        .federation()
        .resolve()
        .await
        .map_err(|_| AppError::ManifestUnavailable)?;

    state
        .federation()
        .remote_metadata(&name)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Create the federation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/federation/manifest", get(get_manifest))
        .route("/api/federation/remotes", get(list_remotes))
        .route("/api/federation/remotes/{name}", get(get_remote))
}
