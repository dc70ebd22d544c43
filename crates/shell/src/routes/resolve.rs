//! Route resolution endpoint.
//!
//! The shell frontend asks which target handles a location. For a lazy
//! target this is navigation time: the deferred module factory is invoked
//! here, and a load failure surfaces as 502 rather than at registration.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::federation::types::RouteDeclaration;
use crate::router::RouteTarget;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    path: String,
}

/// What a location resolves to.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ResolveResponse {
    /// A screen the shell renders itself.
    Shell {
        screen: String,
        params: HashMap<String, String>,
    },
    /// Catch-all redirect.
    Redirect { to: String },
    /// A remote module, loaded on demand.
    #[serde(rename_all = "camelCase")]
    Remote {
        remote: String,
        module: String,
        params: HashMap<String, String>,
        routes: Vec<RouteDeclaration>,
    },
}

async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> AppResult<Json<ResolveResponse>> {
    state
        .federation()
        .resolve()
        .await
        .map_err(|_| AppError::ManifestUnavailable)?;

    let matched = state
        .routes()
        .match_path(&query.path)
        .ok_or(AppError::NotFound)?;

    let response = match matched.entry.target {
        RouteTarget::Shell { screen } => ResolveResponse::Shell {
            screen,
            params: matched.params,
        },
        RouteTarget::Redirect { to } => ResolveResponse::Redirect { to },
        RouteTarget::Lazy { remote, module } => {
            let factory = state.loaders().factory(&remote, &module);
            let loaded = factory.load().await.map_err(AppError::RemoteLoadFailed)?;

            ResolveResponse::Remote {
                remote,
                module,
                params: matched.params,
                routes: loaded.routes.clone(),
            }
        }
    };

    Ok(Json(response))
}

/// Create the route resolution router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/routes/resolve", get(resolve_route))
}
