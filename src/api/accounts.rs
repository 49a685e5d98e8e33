//! Development Accounts
//!
//! In-memory user registry backing the auth endpoints of the development
//! backend. Tokens are opaque uuids valid until the process exits. Passwords
//! are kept as given; this registry never leaves the dev server.

use std::collections::HashMap;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{JwtResponse, LoginRequest, RegisterRequest};
use crate::session::User;

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// Registered accounts and issued tokens
#[derive(Debug, Default)]
pub struct Accounts {
    by_email: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    next_id: i64,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Accounts {
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    /// Register and sign in a new account
    pub fn register(&mut self, request: &RegisterRequest) -> ApiResult<JwtResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        if self.by_email.contains_key(&email) {
            return Err(ApiError::Conflict(format!("Email {} is already registered", email)));
        }

        self.next_id += 1;
        let user = User {
            id: self.next_id,
            email: email.clone(),
            name: request.name.trim().to_string(),
            provider: None,
            provider_id: None,
        };
        self.by_email.insert(
            email.clone(),
            Account {
                user: user.clone(),
                password: request.password.clone(),
            },
        );

        tracing::info!(user_id = user.id, "Registered account");
        Ok(self.issue(&email, user))
    }

    /// Check credentials and issue a fresh token
    pub fn login(&mut self, request: &LoginRequest) -> ApiResult<JwtResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let user = match self.by_email.get(&email) {
            Some(account) if account.password == request.password => account.user.clone(),
            _ => return Err(ApiError::Unauthorized("Invalid email or password".to_string())),
        };

        Ok(self.issue(&email, user))
    }

    /// Account owning `token`, if any
    pub fn user_for_token(&self, token: &str) -> Option<&User> {
        self.tokens
            .get(token)
            .and_then(|email| self.by_email.get(email))
            .map(|account| &account.user)
    }

    fn issue(&mut self, email: &str, user: User) -> JwtResponse {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), email.to_string());
        JwtResponse { token, user }
    }
}
