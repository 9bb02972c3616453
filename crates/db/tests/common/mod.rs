use chrono::{DateTime, Duration, TimeZone, Utc};
use klawed_db::schema::initialize_database;
use klawed_db::DbPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// A migrated pool on `TEST_DATABASE_URL`, or `None` when no test database is configured
pub async fn create_test_pool() -> Option<DbPool> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    initialize_database(&pool)
        .await
        .expect("Failed to initialize test database schema");

    Some(pool)
}

/// A slot far in the future that no other test run picks
pub fn unique_slot() -> DateTime<Utc> {
    let offset = (Uuid::new_v4().as_u128() % 5_000_000) as i64;
    Utc.with_ymd_and_hms(2090, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(offset * 30)
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}
