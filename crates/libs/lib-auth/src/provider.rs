//! # Identity Provider
//!
//! The HTTP layer talks to identity through [`IdentityProvider`]: create an
//! account, exchange credentials for a bearer token, and resolve a token back
//! to a stable uid.
//!
//! [`LocalIdentityProvider`] keeps credentials in memory, hashes passwords
//! with Argon2 and signs HS256 JWTs with `sub = uid`.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AuthError;
use crate::pwd::{hash_password, verify_password};
use crate::token::{decode_jwt, encode_jwt};

/// Identity resolved from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register an account and return its uid.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Check credentials and return a fresh token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Issue a token for an existing uid.
    async fn issue_token(&self, uid: &str) -> Result<String, AuthError>;

    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

#[derive(Debug, Clone)]
struct Credential {
    uid: String,
    email: String,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Accounts {
    by_email: HashMap<String, Credential>,
    email_by_uid: HashMap<String, String>,
}

pub struct LocalIdentityProvider {
    jwt_secret: String,
    expiration_hours: i64,
    accounts: RwLock<Accounts>,
}

impl LocalIdentityProvider {
    pub fn new(jwt_secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            expiration_hours,
            accounts: RwLock::new(Accounts::default()),
        }
    }

    fn sign(&self, uid: &str, email: &str) -> Result<String, AuthError> {
        encode_jwt(uid, email, &self.jwt_secret, self.expiration_hours)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = normalize(email);
        let password_hash = hash_password(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.by_email.contains_key(&email) {
            warn!("[AUTH] Email already registered: {}", email);
            return Err(AuthError::EmailTaken);
        }

        let uid = Uuid::new_v4().to_string();
        accounts.email_by_uid.insert(uid.clone(), email.clone());
        accounts.by_email.insert(
            email.clone(),
            Credential {
                uid: uid.clone(),
                email,
                password_hash,
            },
        );

        debug!("[AUTH] Registered uid={}", uid);
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let credential = {
            let accounts = self.accounts.read().await;
            accounts.by_email.get(&normalize(email)).cloned()
        };

        let Some(credential) = credential else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &credential.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.sign(&credential.uid, &credential.email)
    }

    async fn issue_token(&self, uid: &str) -> Result<String, AuthError> {
        let email = {
            let accounts = self.accounts.read().await;
            accounts.email_by_uid.get(uid).cloned()
        };
        let email = email.ok_or_else(|| AuthError::InvalidToken(format!("unknown uid {}", uid)))?;
        self.sign(uid, &email)
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let claims = decode_jwt(token, &self.jwt_secret)?;
        Ok(VerifiedIdentity {
            uid: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> LocalIdentityProvider {
        LocalIdentityProvider::new("test-secret-key-must-be-at-least-32-chars-long!", 24)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let idp = provider();
        let uid = idp.sign_up("Alice@Example.com", "SecurePass123!").await.unwrap();

        let token = idp.sign_in("alice@example.com", "SecurePass123!").await.unwrap();
        let identity = idp.verify_token(&token).await.unwrap();
        assert_eq!(identity.uid, uid);
        assert_eq!(identity.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let idp = provider();
        idp.sign_up("a@b.com", "SecurePass123!").await.unwrap();
        assert_eq!(
            idp.sign_up("A@B.com", "OtherPass123!").await,
            Err(AuthError::EmailTaken)
        );
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let idp = provider();
        idp.sign_up("a@b.com", "SecurePass123!").await.unwrap();
        assert_eq!(
            idp.sign_in("a@b.com", "WrongPass123!").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            idp.sign_in("nobody@b.com", "SecurePass123!").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_issue_token_for_known_uid() {
        let idp = provider();
        let uid = idp.sign_up("a@b.com", "SecurePass123!").await.unwrap();
        let token = idp.issue_token(&uid).await.unwrap();
        assert_eq!(idp.verify_token(&token).await.unwrap().uid, uid);
        assert!(idp.issue_token("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let idp = provider();
        assert!(matches!(
            idp.verify_token("not.a.jwt").await,
            Err(AuthError::InvalidToken(_))
        ));
    }
}
