use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Designation {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Department {
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

impl Designation {
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
pub struct CreateNamedItemRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct JobMasterResponse {
    pub departments: Vec<Department>,
    pub designations: Vec<Designation>,
}
