use crate::models::{DbAppointment, DbBookedSlot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use klawed_core::booked::{BookedRow, BookedSlotSource, BookingWindow};
use klawed_core::form::BookingDraft;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, name, email, phone, service_tier, nail_shape, nail_length, \
     appointment_datetime_slot, duration, inspiration_photos, notes, status, created_at";

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    draft: &BookingDraft,
    slot: DateTime<Utc>,
    duration: i32,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, slot={}, duration={}, tier={}",
        id, slot, duration, draft.service_tier
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (
            id, name, email, phone, service_tier, nail_shape, nail_length,
            appointment_datetime_slot, duration, inspiration_photos, notes, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'Pending', $12)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(draft.name.trim())
    .bind(draft.email.trim())
    .bind(draft.phone.trim())
    .bind(draft.service_tier.as_str())
    .bind(draft.nail_shape.as_str())
    .bind(draft.nail_length.as_str())
    .bind(slot)
    .bind(duration)
    .bind(&draft.inspiration_photos)
    .bind(&draft.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Appointment created successfully: id={}", id);
    Ok(appointment)
}

/// Start and duration of every appointment whose start lies in `[start, end]`
pub async fn get_booked_in_window(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbBookedSlot>> {
    tracing::debug!("Fetching booked slots between {} and {}", start, end);

    let rows = sqlx::query_as::<_, DbBookedSlot>(
        r#"
        SELECT appointment_datetime_slot, duration
        FROM appointments
        WHERE appointment_datetime_slot >= $1 AND appointment_datetime_slot <= $2
        ORDER BY appointment_datetime_slot ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {} FROM appointments ORDER BY appointment_datetime_slot DESC",
        APPOINTMENT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Updating appointment status: id={}, status={}", id, status);

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "UPDATE appointments SET status = $2 WHERE id = $1 RETURNING {}",
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn count_appointments_by_status(pool: &Pool<Postgres>, status: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM appointments WHERE status = $1",
    )
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Clients are counted by distinct, case-folded email
pub async fn count_distinct_clients(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT LOWER(email)) FROM appointments",
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Postgres-backed source of booked slots for the availability check
#[derive(Debug, Clone)]
pub struct PgBookedSlots {
    pool: Pool<Postgres>,
}

impl PgBookedSlots {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookedSlotSource for PgBookedSlots {
    async fn fetch_booked(&self, window: &BookingWindow) -> Result<Vec<BookedRow>> {
        let rows = get_booked_in_window(&self.pool, window.start, window.end).await?;

        Ok(rows
            .into_iter()
            .map(|row| BookedRow {
                appointment_datetime_slot: row.appointment_datetime_slot,
                duration: row.duration,
            })
            .collect())
    }
}
