use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::employee::EmployeeResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub employee_id: String,
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub employee_no: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub employee: EmployeeResponse,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub employee_no: String,
}

/// Echo of the account details shown on the activation screen before the
/// employee chooses a password.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub employee_no: String,
    pub full_name: String,
    pub email: String,
    pub plant_location: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub employee_no: String,
    pub password: String,
}

impl Session {
    pub fn new(employee_id: String, token: String, duration_hours: i64) -> Self {
        let now = time::OffsetDateTime::now_utc();
        let expires_at = now + time::Duration::hours(duration_hours);

        Self {
            id: Uuid::new_v4().to_string(),
            employee_id,
            token,
            expires_at: expires_at
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap(),
            created_at: now
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap(),
        }
    }

    pub fn is_expired(&self) -> bool {
        if let Ok(expires_at) = time::OffsetDateTime::parse(
            &self.expires_at,
            &time::format_description::well_known::Rfc3339,
        ) {
            expires_at < time::OffsetDateTime::now_utc()
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_not_expired() {
        let session = Session::new("emp-1".to_string(), "token".to_string(), 24);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_negative_duration_session_is_expired() {
        let session = Session::new("emp-1".to_string(), "token".to_string(), -1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_garbled_expiry_counts_as_expired() {
        let mut session = Session::new("emp-1".to_string(), "token".to_string(), 24);
        session.expires_at = "not-a-timestamp".to_string();
        assert!(session.is_expired());
    }
}
