use serde::{Deserialize, Serialize};

/// Functional area of the plant a grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleCode {
    #[serde(rename = "FAC")]
    Facility,
    #[serde(rename = "SAF")]
    Safety,
}

impl ModuleCode {
    pub const ALL: [ModuleCode; 2] = [ModuleCode::Facility, ModuleCode::Safety];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleCode::Facility => "FAC",
            ModuleCode::Safety => "SAF",
        }
    }
}

impl std::fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModuleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FAC" => Ok(ModuleCode::Facility),
            "SAF" => Ok(ModuleCode::Safety),
            _ => Err(format!("Invalid module code: {}", s)),
        }
    }
}

/// Permission level within a module. Roles are independent grants; none
/// implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCode {
    #[serde(rename = "ADM")]
    Admin,
    #[serde(rename = "PLN")]
    Planner,
    #[serde(rename = "TEC")]
    Technician,
    #[serde(rename = "USR")]
    Requester,
}

impl RoleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCode::Admin => "ADM",
            RoleCode::Planner => "PLN",
            RoleCode::Technician => "TEC",
            RoleCode::Requester => "USR",
        }
    }
}

impl std::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADM" => Ok(RoleCode::Admin),
            "PLN" => Ok(RoleCode::Planner),
            "TEC" => Ok(RoleCode::Technician),
            "USR" => Ok(RoleCode::Requester),
            _ => Err(format!("Invalid role code: {}", s)),
        }
    }
}

/// A (module, role) pair. Module comes first everywhere: struct fields, wire
/// payloads and SQL ordering all use (module_code, role_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrantPair {
    pub module_code: ModuleCode,
    pub role_code: RoleCode,
}

impl GrantPair {
    pub fn new(module_code: ModuleCode, role_code: RoleCode) -> Self {
        Self {
            module_code,
            role_code,
        }
    }

    /// The grant every account falls back to when no access rule matches its
    /// job profile: plain requester access to the facility module.
    pub fn fallback() -> Self {
        Self {
            module_code: ModuleCode::Facility,
            role_code: RoleCode::Requester,
        }
    }
}

/// One stored role assignment row for an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeGrant {
    pub employee_id: String,
    pub module_code: ModuleCode,
    pub role_code: RoleCode,
    pub created_at: String,
}

impl EmployeeGrant {
    pub fn new(employee_id: String, pair: GrantPair) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            employee_id,
            module_code: pair.module_code,
            role_code: pair.role_code,
            created_at: now,
        }
    }
}

// DTOs for API requests/responses
#[derive(Debug, Deserialize)]
pub struct ReplaceAccessRequest {
    pub employee_id: String,
    pub grants: Vec<GrantPair>,
}

#[derive(Debug, Serialize)]
pub struct GrantResponse {
    pub module_code: ModuleCode,
    pub role_code: RoleCode,
}

impl From<&EmployeeGrant> for GrantResponse {
    fn from(grant: &EmployeeGrant) -> Self {
        Self {
            module_code: grant.module_code,
            role_code: grant.role_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_code_round_trip() {
        assert_eq!("FAC".parse::<ModuleCode>().unwrap(), ModuleCode::Facility);
        assert_eq!("saf".parse::<ModuleCode>().unwrap(), ModuleCode::Safety);
        assert_eq!(ModuleCode::Facility.to_string(), "FAC");
        assert!("HR".parse::<ModuleCode>().is_err());
    }

    #[test]
    fn test_role_code_round_trip() {
        assert_eq!("ADM".parse::<RoleCode>().unwrap(), RoleCode::Admin);
        assert_eq!("usr".parse::<RoleCode>().unwrap(), RoleCode::Requester);
        assert_eq!(RoleCode::Technician.to_string(), "TEC");
        assert!("ROOT".parse::<RoleCode>().is_err());
    }

    #[test]
    fn test_fallback_pair() {
        let pair = GrantPair::fallback();
        assert_eq!(pair.module_code, ModuleCode::Facility);
        assert_eq!(pair.role_code, RoleCode::Requester);
    }

    #[test]
    fn test_grant_pair_serde_shape() {
        let pair = GrantPair::new(ModuleCode::Safety, RoleCode::Planner);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"module_code":"SAF","role_code":"PLN"}"#);

        let parsed: GrantPair =
            serde_json::from_str(r#"{"module_code":"FAC","role_code":"ADM"}"#).unwrap();
        assert_eq!(parsed.module_code, ModuleCode::Facility);
        assert_eq!(parsed.role_code, RoleCode::Admin);
    }
}
