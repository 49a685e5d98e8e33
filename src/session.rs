//! Session Context
//!
//! The signed-in user and bearer token, passed explicitly to every gateway
//! and screen that needs them. Created from a login/register response and
//! dropped on logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::JwtResponse;

/// Account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

impl User {
    /// Upper-cased first letter of the name, for the avatar badge
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
    }
}

/// Signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: User,
    signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            signed_in_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl From<JwtResponse> for Session {
    fn from(response: JwtResponse) -> Self {
        Session::new(response.token, response.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: 1,
            email: "kim@example.com".to_string(),
            name: name.to_string(),
            provider: None,
            provider_id: None,
        }
    }

    #[test]
    fn test_initial() {
        assert_eq!(user("kim").initial(), Some('K'));
        assert_eq!(user("  ünal").initial(), Some('Ü'));
        assert_eq!(user("").initial(), None);
    }

    #[test]
    fn test_session_from_response() {
        let response = JwtResponse {
            token: "abc".to_string(),
            user: user("Kim"),
        };
        let session = Session::from(response);
        assert_eq!(session.bearer(), "Bearer abc");
        assert_eq!(session.user().name, "Kim");
    }

    #[test]
    fn test_user_wire_format() {
        let json = r#"{"id":3,"email":"a@b.c","name":"A","provider":"google","providerId":"g-1"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.provider_id.as_deref(), Some("g-1"));
    }
}
