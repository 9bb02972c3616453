use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{paginate, Page};

/// Length of every appointment written through the booking form
pub const APPOINTMENT_DURATION_MINUTES: i32 = 60;

/// Page size used by the admin appointment list
pub const DEFAULT_APPOINTMENTS_PER_PAGE: usize = 5;

labelled_enum! {
    /// Service package level; gallery items are filed under the same tiers
    ServiceTier {
        Artifact => "Artifact",
        Legendary => "Legendary",
        Epic => "Epic",
        Rare => "Rare",
    }
}

impl ServiceTier {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Artifact => "Artifact - Premium Design",
            Self::Legendary => "Legendary - Advanced Design",
            Self::Epic => "Epic - Detailed Design",
            Self::Rare => "Rare - Simple Design",
        }
    }
}

impl Default for ServiceTier {
    fn default() -> Self {
        Self::Rare
    }
}

labelled_enum! {
    NailShape {
        Square => "Square",
        Round => "Round",
        Almond => "Almond",
        Stiletto => "Stiletto",
        Coffin => "Coffin",
    }
}

impl Default for NailShape {
    fn default() -> Self {
        Self::Almond
    }
}

labelled_enum! {
    NailLength {
        Short => "Short",
        Medium => "Medium",
        Long => "Long",
        Xl => "XL",
    }
}

impl Default for NailLength {
    fn default() -> Self {
        Self::Medium
    }
}

labelled_enum! {
    AppointmentStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
        Completed => "Completed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_tier: ServiceTier,
    pub nail_shape: NailShape,
    pub nail_length: NailLength,
    pub appointment_datetime_slot: DateTime<Utc>,
    pub duration: i32,
    pub inspiration_photos: Vec<String>,
    pub notes: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub id: Uuid,
    pub appointment_datetime_slot: DateTime<Utc>,
    pub duration: i32,
    pub status: AppointmentStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusResponse {
    pub id: Uuid,
    pub status: AppointmentStatus,
}

/// Query parameters of the admin appointment list
///
/// `status` accepts any [`AppointmentStatus`] label or `All`. `search` matches
/// name and email case-insensitively and phone as a plain substring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl AppointmentFilter {
    pub fn status_filter(&self) -> Result<Option<AppointmentStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("All") => Ok(None),
            Some(status) => status.parse().map(Some),
        }
    }

    pub fn matches(&self, status: Option<AppointmentStatus>, appointment: &Appointment) -> bool {
        if status.is_some_and(|s| s != appointment.status) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let lowered = term.to_lowercase();
                appointment.name.to_lowercase().contains(&lowered)
                    || appointment.email.to_lowercase().contains(&lowered)
                    || appointment.phone.contains(term)
            }
        }
    }

    pub fn apply(&self, appointments: Vec<Appointment>) -> Result<Page<Appointment>, String> {
        let status = self.status_filter()?;
        let filtered = appointments
            .into_iter()
            .filter(|appointment| self.matches(status, appointment))
            .collect();

        Ok(paginate(
            filtered,
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_APPOINTMENTS_PER_PAGE),
        ))
    }
}
