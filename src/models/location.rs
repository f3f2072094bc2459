use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub plant_location: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub building_id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubArea {
    pub id: String,
    pub area_id: String,
    pub name: String,
    pub created_at: String,
}

/// Dropdown keyword, either an issue category (facility) or a hazard type
/// (safety).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Building {
    pub fn new(name: String, plant_location: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            plant_location,
            created_at: now,
        }
    }
}

impl Area {
    pub fn new(building_id: String, name: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            building_id,
            name,
            created_at: now,
        }
    }
}

impl SubArea {
    pub fn new(area_id: String, name: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            area_id,
            name,
            created_at: now,
        }
    }
}

impl Keyword {
    pub fn new(name: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Deserialize)]
pub struct CreateBuildingRequest {
    pub name: String,
    pub plant_location: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAreaRequest {
    pub building_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubAreaRequest {
    pub area_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateKeywordRequest {
    pub name: String,
}

/// Nested dropdown tree for the ticket forms: buildings at the caller's plant
/// location, each with its areas and sub-areas, plus the keyword list for the
/// module.
#[derive(Debug, Serialize)]
pub struct MasterDataResponse {
    pub locations: Vec<BuildingNode>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BuildingNode {
    pub id: String,
    pub name: String,
    pub areas: Vec<AreaNode>,
}

#[derive(Debug, Serialize)]
pub struct AreaNode {
    pub id: String,
    pub name: String,
    pub sub_areas: Vec<SubAreaNode>,
}

#[derive(Debug, Serialize)]
pub struct SubAreaNode {
    pub id: String,
    pub name: String,
}
