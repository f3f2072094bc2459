use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{EmployeeGrant, Session, VerifyResponse};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};

/// Validates password complexity requirements
/// - 10-72 characters long
/// - Contains uppercase letter
/// - Contains lowercase letter
/// - Contains digit
/// - Contains special character
pub fn validate_password_complexity(password: &str) -> ApiResult<()> {
    let len = password.len();
    if len < 10 || len > 72 {
        return Err(ApiError::BadRequest(
            "Password must be 10-72 characters long".to_string(),
        ));
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_numeric());
    let has_special = password
        .chars()
        .any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c));

    if !has_uppercase {
        return Err(ApiError::BadRequest(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !has_lowercase {
        return Err(ApiError::BadRequest(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !has_digit {
        return Err(ApiError::BadRequest(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !has_special {
        return Err(ApiError::BadRequest(
            "Password must contain at least one special character (!@#$%^&*()_+-=[]{}|;:,.<>?)"
                .to_string(),
        ));
    }

    Ok(())
}

/// Hash password using Argon2id with parameters:
/// - m_cost = 19456 KiB (19 MiB)
/// - t_cost = 2 iterations
/// - p_cost = 1 thread
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(19456) // 19 MiB
        .t_cost(2) // 2 iterations
        .p_cost(1) // 1 thread
        .build()
        .map_err(|_| ApiError::Internal("Failed to build Argon2 params".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify password against Argon2id hash
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate secure random token for sessions (32 bytes = 64 hex characters)
pub fn generate_session_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Result of a successful authentication
pub struct AuthResult {
    pub session: Session,
    pub employee: crate::models::Employee,
    pub grants: Vec<EmployeeGrant>,
}

/// Authenticate an employee by badge number and password.
/// Performs the full login flow:
/// 1. Normalize the employee number
/// 2. Find the employee
/// 3. Reject accounts that have not been activated
/// 4. Verify password
/// 5. Load access grants (an empty grant set is a valid login)
/// 6. Create session
pub async fn authenticate(
    db: &Database,
    employee_no: &str,
    password: &str,
    session_duration_hours: i64,
) -> ApiResult<AuthResult> {
    let employee_no = employee_no.trim();

    // Generic error for unknown badge numbers
    let employee = match db.get_employee_by_no(employee_no).await? {
        Some(employee) => employee,
        None => {
            tracing::debug!("Login rejected: unknown employee_no={}", employee_no);
            return Err(ApiError::Unauthorized);
        }
    };

    if !employee.is_active {
        tracing::warn!(
            "Login rejected for inactive account: employee_no={}",
            employee.employee_no
        );
        return Err(ApiError::Forbidden("Account not activated".to_string()));
    }

    let password_valid = verify_password(password, &employee.password_hash)?;

    if !password_valid {
        tracing::warn!(
            "Password verification failed: employee_no={}",
            employee.employee_no
        );
        return Err(ApiError::Unauthorized);
    }

    let grants = db.get_employee_grants(&employee.id).await?;

    let token = generate_session_token();
    let session = Session::new(employee.id.clone(), token, session_duration_hours);
    db.create_session(&session).await?;

    tracing::info!(
        "Employee logged in: employee_no={}, grants={}",
        employee.employee_no,
        grants.len()
    );

    Ok(AuthResult {
        session,
        employee,
        grants,
    })
}

/// Pre-activation status check. Returns the employee's registered details so
/// they can confirm the badge number belongs to them before setting a password.
pub async fn verify_account(db: &Database, employee_no: &str) -> ApiResult<VerifyResponse> {
    let employee = db
        .get_employee_by_no(employee_no.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee ID not found".to_string()))?;

    if employee.is_active {
        return Err(ApiError::BadRequest(
            "Account is already activated".to_string(),
        ));
    }

    Ok(VerifyResponse {
        employee_no: employee.employee_no,
        full_name: employee.full_name,
        email: employee.email,
        plant_location: employee.plant_location,
    })
}

/// First-login activation: set a real password and mark the account active.
/// Any sessions issued before activation are invalidated.
pub async fn activate_account(db: &Database, employee_no: &str, password: &str) -> ApiResult<()> {
    let employee = db
        .get_employee_by_no(employee_no.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee ID not found".to_string()))?;

    if employee.is_active {
        return Err(ApiError::BadRequest(
            "Account is already activated".to_string(),
        ));
    }

    validate_password_complexity(password)?;

    let password_hash = hash_password(password)?;
    db.activate_employee(&employee.id, &password_hash).await?;
    db.delete_employee_sessions(&employee.id).await?;

    tracing::info!("Account activated: employee_no={}", employee.employee_no);
    Ok(())
}

/// Invalidate one session token.
pub async fn logout(db: &Database, token: &str) -> ApiResult<()> {
    db.delete_session(token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = validate_password_complexity("Short1!");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(73) + "A1!";
        let result = validate_password_complexity(&long_password);
        assert!(result.is_err());
    }

    #[test]
    fn test_password_no_uppercase() {
        let result = validate_password_complexity("lowercase123!");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_no_lowercase() {
        let result = validate_password_complexity("UPPERCASE123!");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_no_digit() {
        let result = validate_password_complexity("Lowercase!");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_no_special() {
        let result = validate_password_complexity("Lowercase123");
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_password() {
        let result = validate_password_complexity("SecureP@ssw0rd");
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "SecureP@ssw0rd123";
        let hash = hash_password(password).unwrap();

        // Should verify with correct password
        let verify_result = verify_password(password, &hash).unwrap();
        assert!(verify_result);

        // Should not verify with incorrect password
        let verify_wrong = verify_password("WrongPassword1!", &hash).unwrap();
        assert!(!verify_wrong);
    }

    #[test]
    fn test_session_token_generation() {
        let token1 = generate_session_token();
        let token2 = generate_session_token();

        // Should be 64 hex characters
        assert_eq!(token1.len(), 64);
        assert_eq!(token2.len(), 64);

        // Should be different
        assert_ne!(token1, token2);

        // Should be valid hex
        assert!(token1.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
