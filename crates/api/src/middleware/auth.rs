//! # Authentication Module
//!
//! Admin login for the studio console: Argon2 password hashing, an in-memory
//! session store keyed by bearer token, and the [`AdminSession`] extractor
//! that guards `/api/admin/*`.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use eyre::Result;
use klawed_core::errors::BookingError;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::RwLock;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

const TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// Returns the hash in PHC string format (algorithm, version, parameters, salt
/// and hash), which is what `ADMIN_PASSWORD_HASH` expects.
///
/// # Example
///
/// ```rust
/// use klawed_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("studio-secret").unwrap();
/// assert!(verify_password(&hashed, "studio-secret").unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Rejects a string that is not a PHC password hash
pub fn check_password_hash(password_hash: &str) -> Result<()> {
    PasswordHash::new(password_hash).map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;
    Ok(())
}

/// Checks `password` against a PHC hash. A malformed hash is an error, a
/// wrong password is `Ok(false)`.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Live admin sessions keyed by bearer token
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes.max(1)),
        }
    }

    /// Opens a session for `email` and returns its token
    pub async fn create(&self, email: &str) -> (String, Session) {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        let session = Session {
            email: email.to_string(),
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > Utc::now());
        sessions.insert(token.clone(), session.clone());

        (token, session)
    }

    /// Returns the session for `token` unless it is unknown or expired
    pub async fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;

        if session.expires_at <= Utc::now() {
            self.sessions.write().await.remove(token);
            return None;
        }

        Some(session)
    }

    /// Ends a session; `false` if there was none
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

/// A request carrying a live admin bearer token
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Missing bearer token".to_string(),
                ))
            })?;

        let session = state.sessions.get(token).await.ok_or_else(|| {
            AppError(BookingError::Authentication(
                "Session expired or unknown".to_string(),
            ))
        })?;

        Ok(Self {
            token: token.to_string(),
            email: session.email,
        })
    }
}
