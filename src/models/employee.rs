use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grant::GrantResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    /// Company-wide employee number (the "global id" printed on the badge).
    /// Login and activation identify the account by this, not by email.
    pub employee_no: String,
    pub full_name: String,
    pub email: String,
    pub plant_location: String,
    pub department_id: Option<String>,
    pub designation_id: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub profile_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Employee {
    pub fn new(
        employee_no: String,
        full_name: String,
        email: String,
        plant_location: String,
        department_id: Option<String>,
        designation_id: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            employee_no: employee_no.to_uppercase(),
            full_name,
            email: email.to_lowercase(),
            plant_location,
            department_id,
            designation_id,
            password_hash,
            is_active: false,
            profile_image: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_no: String,
    pub full_name: String,
    pub email: String,
    pub plant_location: String,
    pub department_id: Option<String>,
    pub designation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileImageRequest {
    /// Base64 data URL, e.g. "data:image/png;base64,...".
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub employee_no: String,
    pub full_name: String,
    pub email: String,
    pub plant_location: String,
    pub department_id: Option<String>,
    pub designation_id: Option<String>,
    pub is_active: bool,
    pub profile_image: Option<String>,
    pub grants: Vec<GrantResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl EmployeeResponse {
    pub fn from_employee(employee: &Employee, grants: Vec<GrantResponse>) -> Self {
        Self {
            id: employee.id.clone(),
            employee_no: employee.employee_no.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            plant_location: employee.plant_location.clone(),
            department_id: employee.department_id.clone(),
            designation_id: employee.designation_id.clone(),
            is_active: employee.is_active,
            profile_image: employee.profile_image.clone(),
            grants,
            created_at: employee.created_at.clone(),
            updated_at: employee.updated_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeResponse>,
    pub total_count: i64,
}

/// Slim listing used when picking a technician to assign.
#[derive(Debug, Serialize)]
pub struct TechnicianResponse {
    pub id: String,
    pub employee_no: String,
    pub full_name: String,
}
