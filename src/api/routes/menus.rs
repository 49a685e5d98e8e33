//! Menu Routes
//!
//! CRUD endpoints for the navigation menu resource.
//!
//! - GET /api/menus - Root items with nested children
//! - POST /api/menus - Create an item (id assigned by the server)
//! - PUT /api/menus/:id - Update an item (absent fields untouched)
//! - DELETE /api/menus/:id - Delete an item and its subtree

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::menu::types::{CreateMenuRequest, MenuNode, UpdateMenuRequest};

/// GET /api/menus
pub async fn list_menus(State(state): State<Arc<AppState>>) -> Json<Vec<MenuNode>> {
    Json(state.menus.read().await.list())
}

/// POST /api/menus
pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMenuRequest>,
) -> ApiResult<(StatusCode, Json<MenuNode>)> {
    let node = state.menus.write().await.create(&req)?;
    tracing::info!(menu_id = %node.id, path = %node.path, "Created menu item");
    Ok((StatusCode::CREATED, Json(node)))
}

/// PUT /api/menus/:id
pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMenuRequest>,
) -> ApiResult<Json<MenuNode>> {
    let node = state.menus.write().await.update(&id, &req)?;
    tracing::info!(menu_id = %id, "Updated menu item");
    Ok(Json(node))
}

/// DELETE /api/menus/:id
pub async fn delete_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.menus.write().await.delete(&id)?;
    tracing::info!(menu_id = %id, "Deleted menu item");
    Ok(StatusCode::NO_CONTENT)
}
