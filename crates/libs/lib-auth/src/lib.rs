//! # Authentication Library
//!
//! The identity-provider contract used by the HTTP layer, plus the local
//! implementation built on Argon2 password hashing and HS256 JWTs.

pub mod error;
pub mod provider;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use provider::{IdentityProvider, LocalIdentityProvider, VerifiedIdentity};
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, encode_jwt, decode_jwt};
