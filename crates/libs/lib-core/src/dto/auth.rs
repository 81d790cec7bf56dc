//! # Authentication DTOs
//!
//! - `POST /api/auth/signup` - [`SignupRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`AuthResponse`]
//!
//! Signup also stores the profile document returned by `GET /api/auth/profile`.

use lib_utils::{validate_email, validate_min_length, validate_not_empty, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};

use super::{check, Validate};
use crate::error::ValidationError;
use crate::model::store::models::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

impl Validate for SignupRequest {
    type Output = SignupRequest;

    fn validate(self) -> Result<SignupRequest, ValidationError> {
        check("email", validate_email(&self.email))?;
        check("password", validate_min_length(&self.password, MIN_PASSWORD_LENGTH, "password"))?;
        check("name", validate_not_empty(&self.name, "name"))?;

        Ok(SignupRequest {
            email: self.email.trim().to_lowercase(),
            name: self.name.trim().to_string(),
            ..self
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = LoginRequest;

    fn validate(self) -> Result<LoginRequest, ValidationError> {
        check("email", validate_not_empty(&self.email, "email"))?;
        check("password", validate_not_empty(&self.password, "password"))?;

        Ok(LoginRequest {
            email: self.email.trim().to_lowercase(),
            ..self
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub uid: String,
}

/// Profile document kept at `users/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileDoc {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}
