//! Authentication Payloads
//!
//! Login/register request bodies and the token response. Register input is
//! validated before any request is sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::User;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// Client-side validation failures of the auth forms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,
}

/// `POST /api/auth/login` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::Required("Email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::Required("Password"));
        }
        Ok(())
    }
}

/// `POST /api/auth/register` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    /// Mismatched confirmation is reported before length
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::Required("Name"));
        }
        if self.email.trim().is_empty() {
            return Err(AuthError::Required("Email"));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Token issued on login/register
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            email: "kim@example.com".to_string(),
            password: password.to_string(),
            name: "Kim".to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_register_validation_order() {
        assert_eq!(register("abc", "abd").validate(), Err(AuthError::PasswordMismatch));
        assert_eq!(register("abc", "abc").validate(), Err(AuthError::PasswordTooShort));
        assert_eq!(register("abcd", "abcd").validate(), Ok(()));
    }

    #[test]
    fn test_register_wire_format() {
        let value = serde_json::to_value(register("abcd", "abcd")).unwrap();
        assert_eq!(value["confirmPassword"], "abcd");
    }

    #[test]
    fn test_login_requires_fields() {
        assert_eq!(
            LoginRequest::new("", "x").validate(),
            Err(AuthError::Required("Email"))
        );
        assert_eq!(
            LoginRequest::new("a@b.c", "").validate(),
            Err(AuthError::Required("Password"))
        );
        assert!(LoginRequest::new("a@b.c", "pw").validate().is_ok());
    }
}
