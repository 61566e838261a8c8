use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{FieldErrors, Validate};
use crate::database::models::{Id, User};
use crate::error::ApiError;

pub const NAME_MIN: usize = 4;
pub const NAME_MAX: usize = 16;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.email("email", &self.email);
        errors.required("password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.length("name", &self.name, NAME_MIN, NAME_MAX);
        errors.email("email", &self.email);
        errors.length("password", &self.password, PASSWORD_MIN, PASSWORD_MAX);
        errors.into_result()
    }
}

/// Partial account update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.length("name", name, NAME_MIN, NAME_MAX);
        }
        if let Some(email) = &self.email {
            errors.email("email", email);
        }
        if let Some(password) = &self.password {
            errors.length("password", password, PASSWORD_MIN, PASSWORD_MAX);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub id: Id,
    pub name: String,
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    /// Public profile: no email
    pub fn public(user: &User) -> Self {
        Self {
            id: user.id,
            name: Some(user.name.clone()),
            email: None,
            created_at: Some(user.created_at),
            updated_at: Some(user.updated_at),
        }
    }

    /// The caller's own account, email included
    pub fn private(user: &User) -> Self {
        Self {
            email: Some(user.email.clone()),
            ..Self::public(user)
        }
    }

    /// Nested author block on journals, forums and comments
    pub fn author(id: Id, name: Option<String>) -> Self {
        Self {
            id,
            name,
            email: None,
            created_at: None,
            updated_at: None,
        }
    }
}
