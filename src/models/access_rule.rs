use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grant::{GrantPair, ModuleCode, RoleCode};

/// One default-access rule row: employees onboarded with this exact
/// (department, designation) job profile automatically receive the
/// (module, role) grant. A profile with several grants has several rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRule {
    pub id: String,
    pub department_id: String,
    pub designation_id: String,
    pub module_code: ModuleCode,
    pub role_code: RoleCode,
    pub created_at: String,
}

impl AccessRule {
    pub fn new(department_id: String, designation_id: String, pair: GrantPair) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            department_id,
            designation_id,
            module_code: pair.module_code,
            role_code: pair.role_code,
            created_at: now,
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Deserialize)]
pub struct CreateAccessRuleRequest {
    pub department_id: String,
    pub designation_id: String,
    pub grants: Vec<GrantPair>,
}

/// Rule row joined with its department/designation names for the admin
/// configuration screen.
#[derive(Debug, Serialize)]
pub struct AccessRuleResponse {
    pub id: String,
    pub department_id: String,
    pub department_name: String,
    pub designation_id: String,
    pub designation_name: String,
    pub module_code: ModuleCode,
    pub role_code: RoleCode,
}
