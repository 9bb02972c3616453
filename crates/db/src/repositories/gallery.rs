use crate::models::DbGalleryItem;
use chrono::Utc;
use eyre::Result;
use klawed_core::models::gallery::{CreateGalleryItemRequest, UpdateGalleryItemRequest};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an item whose media URL has already been resolved
pub async fn create_gallery_item(
    pool: &Pool<Postgres>,
    request: &CreateGalleryItemRequest,
    url: &str,
) -> Result<DbGalleryItem> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating gallery item: id={}, tier={}", id, request.tier);

    let item = sqlx::query_as::<_, DbGalleryItem>(
        r#"
        INSERT INTO gallery (id, title, tier, url, description, resource_type, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, title, tier, url, description, resource_type, created_at
        "#,
    )
    .bind(id)
    .bind(request.title.trim())
    .bind(request.tier.as_str())
    .bind(url)
    .bind(request.description.as_deref())
    .bind(request.resource_type.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn list_gallery_items(
    pool: &Pool<Postgres>,
    tier: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<DbGalleryItem>> {
    let items = sqlx::query_as::<_, DbGalleryItem>(
        r#"
        SELECT id, title, tier, url, description, resource_type, created_at
        FROM gallery
        WHERE $1::VARCHAR IS NULL OR tier = $1
        ORDER BY created_at DESC
        OFFSET $2
        LIMIT $3
        "#,
    )
    .bind(tier)
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

pub async fn update_gallery_item(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &UpdateGalleryItemRequest,
) -> Result<Option<DbGalleryItem>> {
    tracing::debug!("Updating gallery item: id={}", id);

    let item = sqlx::query_as::<_, DbGalleryItem>(
        r#"
        UPDATE gallery SET
            title = COALESCE($2, title),
            tier = COALESCE($3, tier),
            description = COALESCE($4, description),
            url = COALESCE($5, url)
        WHERE id = $1
        RETURNING id, title, tier, url, description, resource_type, created_at
        "#,
    )
    .bind(id)
    .bind(request.title.as_deref().map(str::trim))
    .bind(request.tier.map(|tier| tier.as_str()))
    .bind(request.description.as_deref())
    .bind(request.url.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Returns `false` when no item had that id
pub async fn delete_gallery_item(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM gallery WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_gallery_items(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM gallery")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
