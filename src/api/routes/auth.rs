//! Auth Routes
//!
//! - POST /api/auth/login - Email/password sign-in
//! - POST /api/auth/register - Create an account and sign in
//! - GET /api/user/me - Account behind the bearer token
//! - GET /api/user/profile - Same account, profile view

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{JwtResponse, LoginRequest, RegisterRequest};
use crate::session::User;

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<JwtResponse>> {
    let response = state.accounts.write().await.login(&req)?;
    Ok(Json(response))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<JwtResponse>> {
    let response = state.accounts.write().await.register(&req)?;
    Ok(Json(response))
}

/// GET /api/user/me
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    authenticated_user(&state, &headers).await.map(Json)
}

/// GET /api/user/profile
pub async fn profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<User>> {
    authenticated_user(&state, &headers).await.map(Json)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

async fn authenticated_user(state: &AppState, headers: &HeaderMap) -> ApiResult<User> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    state
        .accounts
        .read()
        .await
        .user_for_token(token)
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Unknown or expired token".to_string()))
}
