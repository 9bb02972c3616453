use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The studio runs a single mailing list
pub const DEFAULT_NEWSLETTER_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub id: Uuid,
    pub email: String,
    pub newsletter_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub email: String,
    /// False when the address was already on the list
    pub newly_subscribed: bool,
    pub message: String,
}
