//! Navigation menu route handlers.
//!
//! The menu endpoints never fail on a missing manifest: like the original
//! shell, an unresolvable manifest yields an empty menu (the failure is
//! logged by the menu service) while the federation endpoints report it.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::menu::MenuItem;
use crate::state::AppState;

async fn menu_tree(State(state): State<AppState>) -> Json<Vec<MenuItem>> {
    state.menu().initialize().await;
    Json(state.menu().menu_items())
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    state.menu().initialize().await;
    Json(state.menu().categories())
}

async fn category_items(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Vec<MenuItem>> {
    state.menu().initialize().await;
    Json(state.menu().items_by_category(&name))
}

/// Create the menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(menu_tree))
        .route("/api/menu/categories", get(list_categories))
        .route("/api/menu/categories/{name}", get(category_items))
}
