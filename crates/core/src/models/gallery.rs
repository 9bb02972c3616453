use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::appointment::ServiceTier;

pub type GalleryTier = ServiceTier;

pub const DEFAULT_GALLERY_PAGE_SIZE: i64 = 9;
pub const MAX_GALLERY_PAGE_SIZE: i64 = 50;
/// Browsing stops after this many items per tier
pub const MAX_GALLERY_OFFSET: i64 = 50;

labelled_enum! {
    ResourceType {
        Image => "image",
        Video => "video",
    }
}

impl ResourceType {
    fn extension(&self) -> &'static str {
        match self {
            Self::Image => "jpg",
            Self::Video => "mp4",
        }
    }
}

impl Default for ResourceType {
    fn default() -> Self {
        Self::Image
    }
}

/// Public delivery URL for an asset already uploaded to the media CDN
pub fn cdn_url(cloud_name: &str, resource_type: ResourceType, version: &str, public_id: &str) -> String {
    format!(
        "https://res.cloudinary.com/{}/{}/upload/v{}/{}.{}",
        cloud_name,
        resource_type.as_str(),
        version,
        public_id,
        resource_type.extension()
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: Uuid,
    pub title: String,
    pub tier: GalleryTier,
    pub url: String,
    pub description: Option<String>,
    pub resource_type: ResourceType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryQuery {
    pub tier: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl GalleryQuery {
    pub fn tier_filter(&self) -> Result<Option<GalleryTier>, String> {
        match self.tier.as_deref().map(str::trim) {
            None | Some("") | Some("All") => Ok(None),
            Some(tier) => tier.parse().map(Some),
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).clamp(0, MAX_GALLERY_OFFSET)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_GALLERY_PAGE_SIZE)
            .clamp(1, MAX_GALLERY_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryListResponse {
    pub items: Vec<GalleryItem>,
    pub offset: i64,
    pub limit: i64,
}

/// New gallery entry; supply either `url` or the CDN `public_id` + `version`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGalleryItemRequest {
    pub title: String,
    #[serde(default)]
    pub tier: GalleryTier,
    pub description: Option<String>,
    #[serde(default)]
    pub resource_type: ResourceType,
    pub url: Option<String>,
    pub public_id: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGalleryItemRequest {
    pub title: Option<String>,
    pub tier: Option<GalleryTier>,
    pub description: Option<String>,
    pub url: Option<String>,
}
