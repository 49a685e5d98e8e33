//! Development Backend
//!
//! HTTP API serving the menu resource and the auth endpoints from memory,
//! built with Axum.
//!
//! # Endpoints
//!
//! ## Menus
//! - `GET /api/menus` - Root items with nested children
//! - `POST /api/menus` - Create an item
//! - `PUT /api/menus/:id` - Update an item
//! - `DELETE /api/menus/:id` - Delete an item and its subtree
//!
//! ## Auth
//! - `POST /api/auth/login` - Sign in
//! - `POST /api/auth/register` - Register and sign in
//! - `GET /api/user/me` - Current user (bearer token)
//! - `GET /api/user/profile` - Profile (bearer token)
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use stockdash::api::{serve, AppState};
//! use stockdash::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     serve(AppState::new(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// CORS policy from the configured origins; an empty list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Menu routes
        .route(
            "/menus",
            get(routes::menus::list_menus).post(routes::menus::create_menu),
        )
        .route(
            "/menus/:id",
            put(routes::menus::update_menu).delete(routes::menus::delete_menu),
        )
        // Auth routes
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
        .route("/user/me", get(routes::auth::current_user))
        .route("/user/profile", get(routes::auth::profile));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Stockdash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Stockdash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::types::MenuNode;
    use crate::store::MenuStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::with_store(
            MenuStore::seeded_demo(),
            ApiConfig::default(),
        ))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = create_test_app().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }

        let response = create_test_app().oneshot(get_request("/health")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["menu_items"], 8);
    }

    #[tokio::test]
    async fn test_list_menus_nested() {
        let response = create_test_app()
            .oneshot(get_request("/api/menus"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let roots: Vec<MenuNode> = serde_json::from_slice(&bytes).unwrap();
        let labels: Vec<&str> = roots.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["Dashboard", "Portfolio", "Market", "Admin"]);
        assert_eq!(roots[1].children.len(), 2);
    }

    #[tokio::test]
    async fn test_create_menu() {
        let response = create_test_app()
            .oneshot(json_request(
                "POST",
                "/api/menus",
                r#"{"label":"News","icon":"📰","path":"/news","parentId":null,"order":4}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], "9");
        assert_eq!(body["isActive"], true);
    }

    #[tokio::test]
    async fn test_create_with_unknown_parent_is_rejected() {
        let response = create_test_app()
            .oneshot(json_request(
                "POST",
                "/api/menus",
                r#"{"label":"X","icon":"x","path":"/x","parentId":"99","order":0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_rejects_cycle() {
        let response = create_test_app()
            .oneshot(json_request("PUT", "/api/menus/2", r#"{"parentId":"3"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_moves_to_root() {
        let response = create_test_app()
            .oneshot(json_request("PUT", "/api/menus/3", r#"{"parentId":null}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["parentId"].is_null());
    }

    #[tokio::test]
    async fn test_delete_menu() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/menus/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/menus/8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let response = create_test_app()
            .oneshot(json_request("POST", "/api/menus", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_and_me() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                r#"{"email":"kim@example.com","password":"pass","name":"Kim","confirmPassword":"pass"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(get_request("/api/user/me"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/user/me")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Kim");
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let response = create_test_app()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                r#"{"email":"a@b.c","password":"pass","name":"A","confirmPassword":"pasz"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
