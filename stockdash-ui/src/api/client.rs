//! HTTP API Client
//!
//! gloo-net implementation of [`MenuGateway`] and [`AuthGateway`].

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use stockdash::auth::{JwtResponse, LoginRequest, RegisterRequest};
use stockdash::gateway::{
    menu_path, AuthGateway, GatewayError, GatewayResult, MenuGateway, CURRENT_USER_PATH,
    LOGIN_PATH, MENUS_PATH, PROFILE_PATH, REGISTER_PATH,
};
use stockdash::menu::{CreateMenuRequest, MenuNode, UpdateMenuRequest};
use stockdash::session::User;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

const API_URL_KEY: &str = "stockdash_api_url";
const TOKEN_KEY: &str = "stockdash_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Bearer token saved by the last sign-in
pub fn load_token() -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Browser gateway for the menu and auth endpoints
#[derive(Debug, Clone)]
pub struct GlooGateway {
    base: String,
    token: Option<String>,
}

impl GlooGateway {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base: get_api_base(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(response: Response) -> GatewayResult<Response> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::from_response(status, &body))
    }

    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::check(response).await
    }

    async fn send_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> GatewayResult<Response> {
        let request = self
            .authorize(builder)
            .json(body)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::check(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl MenuGateway for GlooGateway {
    async fn list(&self, _force_refresh: bool) -> GatewayResult<Vec<MenuNode>> {
        let response = self.send(Request::get(&self.url(MENUS_PATH))).await?;
        Self::decode(response).await
    }

    async fn create(&self, request: &CreateMenuRequest) -> GatewayResult<MenuNode> {
        let response = self
            .send_json(Request::post(&self.url(MENUS_PATH)), request)
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, request: &UpdateMenuRequest) -> GatewayResult<MenuNode> {
        let response = self
            .send_json(Request::put(&self.url(&menu_path(id))), request)
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.send(Request::delete(&self.url(&menu_path(id))))
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl AuthGateway for GlooGateway {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<JwtResponse> {
        let response = self
            .send_json(Request::post(&self.url(LOGIN_PATH)), request)
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<JwtResponse> {
        let response = self
            .send_json(Request::post(&self.url(REGISTER_PATH)), request)
            .await?;
        Self::decode(response).await
    }

    async fn current_user(&self) -> GatewayResult<User> {
        let response = self.send(Request::get(&self.url(CURRENT_USER_PATH))).await?;
        Self::decode(response).await
    }

    async fn profile(&self) -> GatewayResult<User> {
        let response = self.send(Request::get(&self.url(PROFILE_PATH))).await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" http://api.test/ "), "http://api.test");
        assert_eq!(normalize_base("http://api.test"), "http://api.test");
    }

    #[test]
    fn test_url_join() {
        let gateway = GlooGateway {
            base: "http://api.test".to_string(),
            token: None,
        };
        assert_eq!(gateway.url(&menu_path("7")), "http://api.test/api/menus/7");
    }
}
