//! HTTP Gateway
//!
//! reqwest implementation of [`MenuGateway`], [`AuthGateway`] and
//! [`StockGateway`]. Connection
//! failures and timeouts surface as [`GatewayError::Transport`], non-2xx
//! responses as [`GatewayError::Server`] with the server's message.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    menu_path, stock_chart_path, stock_price_path, AuthGateway, GatewayError, GatewayResult,
    MenuGateway, StockGateway, CURRENT_USER_PATH, LOGIN_PATH, MENUS_PATH, PROFILE_PATH,
    REGISTER_PATH,
};
use crate::auth::{JwtResponse, LoginRequest, RegisterRequest};
use crate::config::ClientConfig;
use crate::menu::types::{CreateMenuRequest, MenuNode, UpdateMenuRequest};
use crate::session::{Session, User};
use crate::stock::{ChartDataResponse, ChartPoint, StockPriceResponse, StockQuote};

/// REST client for the menu, auth and stock endpoints
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Send the session's bearer token with every request
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token().to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, %url, "Gateway request");

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Transport("Request timed out".to_string())
            } else if e.is_connect() {
                GatewayError::Transport(format!("Server unreachable: {}", e))
            } else {
                GatewayError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = GatewayError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %error, "Gateway request rejected");
            Err(error)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn fetch_json<B, T>(&self, method: Method, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(method, path).json(body)).await
    }
}

#[async_trait(?Send)]
impl MenuGateway for HttpGateway {
    async fn list(&self, force_refresh: bool) -> GatewayResult<Vec<MenuNode>> {
        if force_refresh {
            tracing::debug!("force_refresh has no effect; menus are always fetched");
        }
        self.fetch(self.request(Method::GET, MENUS_PATH)).await
    }

    async fn create(&self, request: &CreateMenuRequest) -> GatewayResult<MenuNode> {
        self.fetch_json(Method::POST, MENUS_PATH, request).await
    }

    async fn update(&self, id: &str, request: &UpdateMenuRequest) -> GatewayResult<MenuNode> {
        self.fetch_json(Method::PUT, &menu_path(id), request).await
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.send(self.request(Method::DELETE, &menu_path(id)))
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl AuthGateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<JwtResponse> {
        self.fetch_json(Method::POST, LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<JwtResponse> {
        self.fetch_json(Method::POST, REGISTER_PATH, request).await
    }

    async fn current_user(&self) -> GatewayResult<User> {
        self.fetch(self.request(Method::GET, CURRENT_USER_PATH)).await
    }

    async fn profile(&self) -> GatewayResult<User> {
        self.fetch(self.request(Method::GET, PROFILE_PATH)).await
    }
}

#[async_trait(?Send)]
impl StockGateway for HttpGateway {
    async fn price(&self, code: &str) -> GatewayResult<StockQuote> {
        let raw: StockPriceResponse = self
            .fetch(self.request(Method::GET, &stock_price_path(code)))
            .await?;
        Ok(StockQuote::try_from(raw)?)
    }

    async fn chart(&self, code: &str, days: u32) -> GatewayResult<Vec<ChartPoint>> {
        let raw: ChartDataResponse = self
            .fetch(self.request(Method::GET, &stock_chart_path(code, days)))
            .await?;
        Ok(raw.into_points()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, AppState};
    use crate::config::ApiConfig;
    use crate::menu::{AdminConfig, AdminController, MenuTree, SubmitOutcome};
    use crate::store::MenuStore;

    async fn spawn_backend(store: MenuStore) -> String {
        let state = AppState::with_store(store, ApiConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Stand-in for the stock-data service, answering with grouped strings
    async fn spawn_stock_service() -> String {
        use axum::extract::{Path, Query};
        use axum::routing::get;
        use axum::{Json, Router};
        use serde_json::{json, Value};
        use std::collections::HashMap;

        let router = Router::new()
            .route(
                "/api/stock/price/:code",
                get(|Path(code): Path<String>| async move {
                    let price = if code == "BAD" { "n/a" } else { "71,300" };
                    Json(json!({
                        "code": code, "name": "Samsung Electronics", "price": price,
                        "change": "-1,200", "changePercent": "-1.66", "volume": "12,345,678",
                        "isUp": false, "isDown": true
                    }))
                }),
            )
            .route(
                "/api/stock/chart/:code",
                get(
                    |Path(code): Path<String>, Query(query): Query<HashMap<String, String>>| async move {
                        let days: usize = query.get("days").and_then(|d| d.parse().ok()).unwrap_or(0);
                        let data: Vec<Value> = (0..days)
                            .map(|i| json!({"date": format!("2024-01-0{}", i + 1), "price": "1,000", "volume": "2,500"}))
                            .collect();
                        Json(json!({ "code": code, "data": data }))
                    },
                ),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn gateway(base_url: String) -> HttpGateway {
        HttpGateway::new(&ClientConfig {
            base_url,
            request_timeout_secs: 5,
            token: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_menu_crud_round_trip() {
        let gw = gateway(spawn_backend(MenuStore::seeded_demo()).await);

        let roots = gw.list(true).await.unwrap();
        let tree = MenuTree::from_roots(roots).unwrap();
        assert_eq!(tree.len(), 8);

        let created = gw
            .create(&CreateMenuRequest {
                label: "Alerts".to_string(),
                icon: "🔔".to_string(),
                path: "/market/alerts".to_string(),
                parent_id: Some("5".to_string()),
                order: 1,
                permissions: None,
            })
            .await
            .unwrap();
        assert_eq!(created.parent_id.as_deref(), Some("5"));

        let update = UpdateMenuRequest {
            label: Some("Price Alerts".to_string()),
            ..Default::default()
        };
        let updated = gw.update(&created.id, &update).await.unwrap();
        assert_eq!(updated.label, "Price Alerts");

        gw.delete("2").await.unwrap();
        let tree = MenuTree::from_roots(gw.list(false).await.unwrap()).unwrap();
        assert!(!tree.contains("2"));
        assert!(!tree.contains("3"));
        assert!(tree.contains(&created.id));
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let gw = gateway(spawn_backend(MenuStore::new()).await);

        let err = gw.delete("404").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        match err {
            GatewayError::Server { message, .. } => assert!(message.contains("404")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gw = gateway(format!("http://{}", addr));
        assert!(gw.list(false).await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_register_then_fetch_profile() {
        let gw = gateway(spawn_backend(MenuStore::new()).await);

        let jwt = gw
            .register(&RegisterRequest {
                email: "kim@example.com".to_string(),
                password: "secret".to_string(),
                name: "Kim".to_string(),
                confirm_password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert!(gw.current_user().await.unwrap_err().is_rejection());

        let session = Session::from(jwt);
        let authed = gw.clone().with_session(&session);
        let me = authed.current_user().await.unwrap();
        assert_eq!(me.email, "kim@example.com");
        assert_eq!(authed.profile().await.unwrap(), me);

        let bad = gw
            .login(&LoginRequest::new("kim@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(bad.status(), Some(401));
    }

    #[tokio::test]
    async fn test_stock_quote_and_chart_are_parsed() {
        let gw = gateway(spawn_stock_service().await);

        let quote = gw.price("005930").await.unwrap();
        assert_eq!(quote.price, 71_300);
        assert_eq!(quote.change, -1_200);
        assert_eq!(quote.volume, 12_345_678);
        assert!((quote.change_percent + 1.66).abs() < 1e-9);
        assert!(quote.is_down);

        let points = gw.chart("005930", 3).await.unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].price, 1_000);
        assert_eq!(points[2].volume, 2_500);
    }

    #[tokio::test]
    async fn test_unparseable_stock_value_is_decode_error() {
        let gw = gateway(spawn_stock_service().await);
        match gw.price("BAD").await.unwrap_err() {
            GatewayError::Decode(message) => assert!(message.contains("price")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_controller_over_http() {
        let gw = gateway(spawn_backend(MenuStore::seeded_demo()).await);
        let mut controller = AdminController::new(gw, AdminConfig::default());

        controller.load().await;
        assert_eq!(controller.screen().tree().len(), 8);

        controller.screen_mut().open_create().unwrap();
        let form = controller.screen_mut().form_mut();
        form.label = "News".to_string();
        form.icon = "📰".to_string();
        form.path = "/news".to_string();
        assert!(matches!(
            controller.submit().await.unwrap(),
            SubmitOutcome::Saved(_)
        ));
        assert_eq!(controller.screen().tree().len(), 9);
    }
}
