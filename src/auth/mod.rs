//! Password hashing and session token authentication

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use thiserror::Error;

use crate::api::{AppError, AppState};
use crate::db;
use crate::domain::{Role, User};

/// Header carrying the session token
pub const TOKEN_HEADER: &str = "x-token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password with argon2 and a fresh salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored argon2 hash
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// The authenticated user behind a valid, unexpired X-Token header
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Reject non-admin callers
    pub fn require_admin(&self) -> Result<&User, AppError> {
        if self.0.role != Role::Admin {
            return Err(AppError::Forbidden("Insufficient privileges".to_string()));
        }
        Ok(&self.0)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing X-Token header".to_string()))?;

        let user = db::get_token_user(&state.pool, token, state.config.auth.token_ttl_secs)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Token not found or expired".to_string()))?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthUser(User {
            id: 1,
            name: "Root".to_string(),
            phone: "+1".to_string(),
            email: "root@example.com".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        });
        assert!(admin.require_admin().is_ok());

        let user = AuthUser(User {
            id: 2,
            name: "Guest".to_string(),
            phone: "+1".to_string(),
            email: "guest@example.com".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        });
        assert!(user.require_admin().is_err());
    }
}
