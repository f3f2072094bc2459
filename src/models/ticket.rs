use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::Assigned => write!(f, "assigned"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Completed => write!(f, "completed"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "assigned" => Ok(TicketStatus::Assigned),
            "in_progress" => Ok(TicketStatus::InProgress),
            "completed" => Ok(TicketStatus::Completed),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(format!("Invalid ticket status: {}", s)),
        }
    }
}

// Lenient conversion for rows coming back from the database
impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(TicketStatus::Open)
    }
}

/// A maintenance ticket. Facility and safety tickets share this shape; safety
/// tickets additionally carry an optional photo of the hazard. Building/area
/// names are snapshotted at creation so later master-data edits do not rewrite
/// ticket history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub ticket_number: i64,
    pub raiser_id: String,
    pub raiser_name: String,
    pub plant_location: String,
    pub building_name: String,
    pub area_name: Option<String>,
    pub sub_area_name: Option<String>,
    pub keyword: String,
    pub description: Option<String>,
    pub image_data: Option<String>,
    pub status: TicketStatus,
    pub assigned_to_id: Option<String>,
    pub assigned_to_name: Option<String>,
    pub planned_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Ticket {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        raiser_id: String,
        raiser_name: String,
        plant_location: String,
        building_name: String,
        area_name: Option<String>,
        sub_area_name: Option<String>,
        keyword: String,
        description: Option<String>,
        image_data: Option<String>,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            ticket_number: 0, // allocated by the insert
            raiser_id,
            raiser_name,
            plant_location,
            building_name,
            area_name,
            sub_area_name,
            keyword,
            description,
            image_data,
            status: TicketStatus::Open,
            assigned_to_id: None,
            assigned_to_name: None,
            planned_by: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub building_id: String,
    pub area_id: Option<String>,
    pub sub_area_id: Option<String>,
    pub keyword: String,
    pub description: Option<String>,
    /// Base64 data URL photo, accepted for safety tickets only.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignTicketRequest {
    pub technician_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<Ticket>,
    pub total_count: i64,
}
