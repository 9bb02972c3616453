use crate::models::DbInquiry;
use chrono::Utc;
use eyre::Result;
use klawed_core::models::inquiry::CreateInquiryRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_inquiry(
    pool: &Pool<Postgres>,
    request: &CreateInquiryRequest,
) -> Result<DbInquiry> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating inquiry: id={}, photos={}", id, request.inspiration_photos.len());

    let inquiry = sqlx::query_as::<_, DbInquiry>(
        r#"
        INSERT INTO inquiries (id, name, email, design_description, inspiration_photos, status, created_at)
        VALUES ($1, $2, $3, $4, $5, 'New', $6)
        RETURNING id, name, email, design_description, inspiration_photos, status, created_at
        "#,
    )
    .bind(id)
    .bind(request.name.trim())
    .bind(request.email.trim())
    .bind(request.design_description.trim())
    .bind(&request.inspiration_photos)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(inquiry)
}

/// Newest first, optionally narrowed to one status
pub async fn list_inquiries(pool: &Pool<Postgres>, status: Option<&str>) -> Result<Vec<DbInquiry>> {
    let inquiries = sqlx::query_as::<_, DbInquiry>(
        r#"
        SELECT id, name, email, design_description, inspiration_photos, status, created_at
        FROM inquiries
        WHERE $1::VARCHAR IS NULL OR status = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(inquiries)
}

pub async fn update_inquiry_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbInquiry>> {
    tracing::debug!("Updating inquiry status: id={}, status={}", id, status);

    let inquiry = sqlx::query_as::<_, DbInquiry>(
        r#"
        UPDATE inquiries SET status = $2
        WHERE id = $1
        RETURNING id, name, email, design_description, inspiration_photos, status, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(inquiry)
}

pub async fn count_inquiries_by_status(pool: &Pool<Postgres>, status: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inquiries WHERE status = $1")
        .bind(status)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
