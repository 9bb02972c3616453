use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

labelled_enum! {
    InquiryStatus {
        New => "New",
        Reviewed => "Reviewed",
        Responded => "Responded",
    }
}

/// A request for a custom design, reviewed by the artist before any booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub design_description: String,
    pub inspiration_photos: Vec<String>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInquiryRequest {
    pub name: String,
    pub email: String,
    pub design_description: String,
    #[serde(default)]
    pub inspiration_photos: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInquiryResponse {
    pub id: Uuid,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryQuery {
    pub status: Option<String>,
}

impl InquiryQuery {
    pub fn status_filter(&self) -> Result<Option<InquiryStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("All") => Ok(None),
            Some(status) => status.parse().map(Some),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInquiryStatusResponse {
    pub id: Uuid,
    pub status: InquiryStatus,
}
