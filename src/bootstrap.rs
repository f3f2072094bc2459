use crate::api::middleware::{ApiError, AppState};
use crate::config::Config;
use crate::database::Database;
use crate::models::{Employee, GrantPair, ModuleCode, RoleCode};
use crate::services::auth::{hash_password, validate_password_complexity};
use crate::services::validators::{
    validate_and_normalize_email, validate_and_normalize_employee_no,
};
use std::sync::Arc;

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    AppState {
        db: Arc::new(db),
        session_duration_hours: config.session_duration_hours,
        default_employee_password: config.default_employee_password.clone(),
    }
}

pub async fn initialize_admin(db: &Database, config: &Config) -> Result<(), ApiError> {
    tracing::info!("Checking for admin account initialization");

    let employee_no = validate_and_normalize_employee_no(&config.admin_employee_no)?;

    // Check if the admin already exists
    if db.get_employee_by_no(&employee_no).await?.is_some() {
        tracing::info!("Admin account already exists: {}", employee_no);
        return Ok(());
    }

    tracing::info!("Creating admin account: {}", employee_no);

    // Validate admin password complexity
    validate_password_complexity(&config.admin_password)?;

    // Validate and normalize email
    let email = validate_and_normalize_email(&config.admin_email)?;

    // Hash password
    let password_hash = hash_password(&config.admin_password)?;

    // The seeded admin skips the activation flow and can log in immediately.
    let mut admin = Employee::new(
        employee_no,
        config.admin_name.clone(),
        email,
        config.admin_location.clone(),
        None,
        None,
        password_hash,
    );
    admin.is_active = true;

    // The seeded account is admin in every module, not only the facility
    // pair that marks a system administrator.
    let grants: Vec<GrantPair> = ModuleCode::ALL
        .iter()
        .map(|&module| GrantPair::new(module, RoleCode::Admin))
        .collect();
    db.create_employee_with_grants(&admin, &grants).await?;

    tracing::info!("Admin account created successfully: {}", admin.employee_no);

    Ok(())
}
