use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            service_tier VARCHAR(32) NOT NULL,
            nail_shape VARCHAR(32) NOT NULL,
            nail_length VARCHAR(32) NOT NULL,
            appointment_datetime_slot TIMESTAMP WITH TIME ZONE NOT NULL,
            duration INTEGER NOT NULL DEFAULT 60,
            inspiration_photos TEXT[] NOT NULL DEFAULT '{}',
            notes TEXT NOT NULL DEFAULT '',
            status VARCHAR(32) NOT NULL DEFAULT 'Pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create inquiries table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inquiries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            design_description TEXT NOT NULL,
            inspiration_photos TEXT[] NOT NULL DEFAULT '{}',
            status VARCHAR(32) NOT NULL DEFAULT 'New',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create newsletters table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS newsletters (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL,
            newsletter_id INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_subscription UNIQUE (newsletter_id, email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create gallery table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gallery (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(255) NOT NULL,
            tier VARCHAR(32) NOT NULL,
            url TEXT NOT NULL,
            description TEXT NULL,
            resource_type VARCHAR(16) NOT NULL DEFAULT 'image',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_appointments_datetime_slot ON appointments(appointment_datetime_slot)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status)",
        "CREATE INDEX IF NOT EXISTS idx_inquiries_status ON inquiries(status)",
        "CREATE INDEX IF NOT EXISTS idx_gallery_tier_created_at ON gallery(tier, created_at DESC)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
