use crate::models::DbNewsletterSignup;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Adds `email` to the list; returns `false` if it was already subscribed
pub async fn subscribe(pool: &Pool<Postgres>, email: &str, newsletter_id: i32) -> Result<bool> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let inserted = sqlx::query_as::<_, DbNewsletterSignup>(
        r#"
        INSERT INTO newsletters (id, email, newsletter_id, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (newsletter_id, email) DO NOTHING
        RETURNING id, email, newsletter_id, created_at
        "#,
    )
    .bind(id)
    .bind(email.trim())
    .bind(newsletter_id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    tracing::debug!(
        "Newsletter signup: newsletter_id={}, newly_subscribed={}",
        newsletter_id,
        inserted.is_some()
    );
    Ok(inserted.is_some())
}

pub async fn list_subscribers(
    pool: &Pool<Postgres>,
    newsletter_id: i32,
) -> Result<Vec<DbNewsletterSignup>> {
    let signups = sqlx::query_as::<_, DbNewsletterSignup>(
        r#"
        SELECT id, email, newsletter_id, created_at
        FROM newsletters
        WHERE newsletter_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(newsletter_id)
    .fetch_all(pool)
    .await?;

    Ok(signups)
}
