//! # Klawed API
//!
//! The web server for the studio's booking site: availability, appointment
//! requests, design inquiries, the newsletter, the public gallery and the
//! admin console.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Admin sessions and error mapping
//! - **Config**: Environment and studio configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use klawed_core::booked::{BookedSlotSource, BookingWindow, FetchFailurePolicy};
use klawed_core::calendar::BookingCalendar;
use klawed_core::form::ScheduleRules;
use klawed_core::slots::{BufferPolicy, BusinessHours};
use klawed_db::PgBookedSlots;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::{AdminCredentials, ApiConfig};
use middleware::auth::SessionStore;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Where committed bookings are read from when computing availability
    pub booked: Arc<dyn BookedSlotSource>,
    pub sessions: SessionStore,
    pub calendar: BookingCalendar,
    pub hours: BusinessHours,
    pub timezone: Tz,
    pub buffer_policy: BufferPolicy,
    pub fetch_policy: FetchFailurePolicy,
    pub admin: AdminCredentials,
    pub cdn_cloud_name: String,
}

impl ApiState {
    /// State reading bookings from the same database the API writes to
    pub fn new(config: &ApiConfig, db_pool: PgPool) -> Self {
        let booked = Arc::new(PgBookedSlots::new(db_pool.clone()));
        Self::with_booked_source(config, db_pool, booked)
    }

    pub fn with_booked_source(
        config: &ApiConfig,
        db_pool: PgPool,
        booked: Arc<dyn BookedSlotSource>,
    ) -> Self {
        Self {
            db_pool,
            booked,
            sessions: SessionStore::new(config.admin.session_ttl_minutes),
            calendar: BookingCalendar::new(config.blocked_dates.iter().copied()),
            hours: BusinessHours::STANDARD,
            timezone: config.timezone,
            buffer_policy: config.buffer_policy,
            fetch_policy: config.fetch_policy,
            admin: config.admin.clone(),
            cdn_cloud_name: config.cdn_cloud_name.clone(),
        }
    }

    /// Today's date in the studio's time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Days a customer may currently pick
    pub fn booking_window(&self) -> BookingWindow {
        BookingWindow::from_today(self.today(), self.timezone)
    }

    pub fn schedule_rules<'a>(&'a self, window: &'a BookingWindow) -> ScheduleRules<'a> {
        ScheduleRules {
            calendar: &self.calendar,
            window,
        }
    }
}

/// All API routes with request tracing, ready to serve
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Public booking site endpoints
        .merge(routes::availability::routes())
        .merge(routes::appointment::routes())
        .merge(routes::inquiry::routes())
        .merge(routes::newsletter::routes())
        .merge(routes::gallery::routes())
        // Admin console endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = klawed_api::config::ApiConfig::from_env()?;
/// let db_pool = klawed_db::create_pool(&config.database_url).await?;
/// klawed_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Studio time zone {}, buffer policy {:?}, fetch policy {:?}",
        config.timezone, config.buffer_policy, config.fetch_policy
    );

    let state = Arc::new(ApiState::new(&config, db_pool));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<std::result::Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
