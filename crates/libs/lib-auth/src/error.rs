//! # Authentication Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Hashing or signing failed; not caused by the caller.
    #[error("Identity provider failure: {0}")]
    Provider(String),
}
