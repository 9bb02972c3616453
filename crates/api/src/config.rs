//! # API Configuration Module
//!
//! Loads the server and studio settings from environment variables, with
//! defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `BUSINESS_TIMEZONE`: IANA zone the studio works in (default: "America/Toronto")
//! - `BLOCKED_DATES`: Comma-separated `YYYY-MM-DD` days off (default: "2025-07-15,2025-07-16")
//! - `SLOT_BUFFER_POLICY`: `retract_prior` (default) or `exclusion_window`
//! - `BOOKED_FETCH_POLICY`: `fail_open` (default) or `fail_closed`
//! - `ADMIN_EMAIL`: Login of the single admin account (required)
//! - `ADMIN_PASSWORD_HASH`: Argon2 PHC string for the admin password
//! - `ADMIN_PASSWORD`: Plain admin password, hashed at startup when no hash is set
//! - `ADMIN_SESSION_TTL_MINUTES`: Admin session lifetime (default: 480)
//! - `CDN_CLOUD_NAME`: Media CDN account used for gallery URLs (default: "dcmetdbkq")

use chrono::NaiveDate;
use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use klawed_core::booked::FetchFailurePolicy;
use klawed_core::calendar::{default_blocked_dates, parse_blocked_dates};
use klawed_core::slots::BufferPolicy;
use std::env;
use tracing::Level;

use crate::middleware::auth::{check_password_hash, hash_password};

/// Configuration for the booking API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origins: Option<Vec<String>>,
    /// Request timeout in seconds
    pub request_timeout: u64,
    pub timezone: Tz,
    pub blocked_dates: Vec<NaiveDate>,
    pub buffer_policy: BufferPolicy,
    pub fetch_policy: FetchFailurePolicy,
    pub admin: AdminCredentials,
    pub cdn_cloud_name: String,
}

/// The one admin login the console accepts
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub session_ttl_minutes: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `ADMIN_EMAIL` is not set
    /// - neither `ADMIN_PASSWORD_HASH` nor `ADMIN_PASSWORD` is set
    /// - `API_PORT`, `BUSINESS_TIMEZONE`, `BLOCKED_DATES` or one of the policies cannot be parsed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Studio settings
        let timezone = env::var("BUSINESS_TIMEZONE")
            .unwrap_or_else(|_| "America/Toronto".to_string())
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid BUSINESS_TIMEZONE value: {}", e))?;

        let blocked_dates = match env::var("BLOCKED_DATES") {
            Ok(raw) => parse_blocked_dates(&raw).wrap_err("Invalid BLOCKED_DATES value")?,
            Err(_) => default_blocked_dates(),
        };

        let buffer_policy = env::var("SLOT_BUFFER_POLICY")
            .ok()
            .map(|raw| raw.parse::<BufferPolicy>())
            .transpose()
            .map_err(|e| eyre!("Invalid SLOT_BUFFER_POLICY value: {}", e))?
            .unwrap_or_default();

        let fetch_policy = env::var("BOOKED_FETCH_POLICY")
            .ok()
            .map(|raw| raw.parse::<FetchFailurePolicy>())
            .transpose()
            .map_err(|e| eyre!("Invalid BOOKED_FETCH_POLICY value: {}", e))?
            .unwrap_or_default();

        // Security settings
        let admin = AdminCredentials::from_env()?;

        let cdn_cloud_name = env::var("CDN_CLOUD_NAME").unwrap_or_else(|_| "dcmetdbkq".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            timezone,
            blocked_dates,
            buffer_policy,
            fetch_policy,
            admin,
            cdn_cloud_name,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AdminCredentials {
    fn from_env() -> Result<Self> {
        let email = env::var("ADMIN_EMAIL").wrap_err("ADMIN_EMAIL environment variable must be set")?;

        let password_hash = Self::password_hash_from(
            env::var("ADMIN_PASSWORD_HASH").ok(),
            env::var("ADMIN_PASSWORD").ok(),
        )?;

        let session_ttl_minutes = env::var("ADMIN_SESSION_TTL_MINUTES")
            .unwrap_or_else(|_| "480".to_string())
            .parse()
            .wrap_err("Invalid ADMIN_SESSION_TTL_MINUTES value")?;

        Ok(Self {
            email,
            password_hash,
            session_ttl_minutes,
        })
    }

    /// Picks the configured hash, or hashes the plain password when no hash is set.
    /// A hash that does not parse fails here instead of on every login.
    pub fn password_hash_from(hash: Option<String>, password: Option<String>) -> Result<String> {
        match (hash, password) {
            (Some(hash), _) => {
                check_password_hash(&hash).wrap_err("Invalid ADMIN_PASSWORD_HASH value")?;
                Ok(hash)
            }
            (None, Some(password)) => hash_password(&password),
            (None, None) => Err(eyre!("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD must be set")),
        }
    }
}

pub fn parse_log_level(raw: &str) -> Level {
    match raw {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
