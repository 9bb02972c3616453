use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use klawed_core::models::{
    appointment::Appointment, gallery::GalleryItem, inquiry::Inquiry,
    newsletter::NewsletterSignup,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_tier: String,
    pub nail_shape: String,
    pub nail_length: String,
    pub appointment_datetime_slot: DateTime<Utc>,
    pub duration: i32,
    pub inspiration_photos: Vec<String>,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        Ok(Self {
            service_tier: row.service_tier.parse().map_err(|e| eyre!("{}", e))?,
            nail_shape: row.nail_shape.parse().map_err(|e| eyre!("{}", e))?,
            nail_length: row.nail_length.parse().map_err(|e| eyre!("{}", e))?,
            status: row.status.parse().map_err(|e| eyre!("{}", e))?,
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            appointment_datetime_slot: row.appointment_datetime_slot,
            duration: row.duration,
            inspiration_photos: row.inspiration_photos,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Only the columns the availability check needs
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookedSlot {
    pub appointment_datetime_slot: DateTime<Utc>,
    pub duration: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub design_description: String,
    pub inspiration_photos: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbInquiry> for Inquiry {
    type Error = eyre::Report;

    fn try_from(row: DbInquiry) -> Result<Self> {
        Ok(Self {
            status: row.status.parse().map_err(|e| eyre!("{}", e))?,
            id: row.id,
            name: row.name,
            email: row.email,
            design_description: row.design_description,
            inspiration_photos: row.inspiration_photos,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNewsletterSignup {
    pub id: Uuid,
    pub email: String,
    pub newsletter_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbNewsletterSignup> for NewsletterSignup {
    fn from(row: DbNewsletterSignup) -> Self {
        Self {
            id: row.id,
            email: row.email,
            newsletter_id: row.newsletter_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGalleryItem {
    pub id: Uuid,
    pub title: String,
    pub tier: String,
    pub url: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbGalleryItem> for GalleryItem {
    type Error = eyre::Report;

    fn try_from(row: DbGalleryItem) -> Result<Self> {
        Ok(Self {
            tier: row.tier.parse().map_err(|e| eyre!("{}", e))?,
            resource_type: row.resource_type.parse().map_err(|e| eyre!("{}", e))?,
            id: row.id,
            title: row.title,
            url: row.url,
            description: row.description,
            created_at: row.created_at,
        })
    }
}
