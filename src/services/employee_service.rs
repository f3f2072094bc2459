use std::collections::HashMap;

use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::Database;
use crate::models::{
    CreateEmployeeRequest, Employee, EmployeeGrant, EmployeeListResponse, EmployeeResponse,
    GrantPair, GrantResponse,
};
use crate::services::{
    access, hash_password, validate_and_normalize_email, validate_and_normalize_employee_no,
    validate_image_payload, validate_required,
};

fn require_system_admin(auth: &AuthenticatedEmployee) -> ApiResult<()> {
    if !auth.is_system_admin() {
        tracing::warn!(
            "Permission denied: {} is not a system administrator",
            auth.employee.employee_no
        );
        return Err(ApiError::Forbidden(
            "Requires system administrator access".to_string(),
        ));
    }
    Ok(())
}

/// Register a new employee and seed their access grants.
///
/// Grants come from the access rules matching the employee's department and
/// designation. When no rule matches (including employees registered without
/// a department or designation), the account falls back to requester access
/// in the facility module so it is never created without any grant row.
/// The employee row and the grant rows are written in one transaction.
pub async fn create_employee(
    db: &Database,
    auth: &AuthenticatedEmployee,
    default_password: &str,
    request: CreateEmployeeRequest,
) -> ApiResult<EmployeeResponse> {
    require_system_admin(auth)?;

    let employee_no = validate_and_normalize_employee_no(&request.employee_no)?;
    validate_required(&request.full_name, "Full name")?;
    validate_required(&request.plant_location, "Plant location")?;
    let email = validate_and_normalize_email(&request.email)?;

    if db.get_employee_by_no(&employee_no).await?.is_some() {
        return Err(ApiError::Conflict("Employee ID already exists".to_string()));
    }

    if let Some(department_id) = &request.department_id {
        if db.get_department_by_id(department_id).await?.is_none() {
            return Err(ApiError::BadRequest("Unknown department".to_string()));
        }
    }
    if let Some(designation_id) = &request.designation_id {
        if db.get_designation_by_id(designation_id).await?.is_none() {
            return Err(ApiError::BadRequest("Unknown designation".to_string()));
        }
    }

    let pairs = resolve_onboarding_grants(
        db,
        request.department_id.as_deref(),
        request.designation_id.as_deref(),
    )
    .await?;

    // New accounts start inactive with the shared placeholder password; the
    // employee replaces it during activation.
    let password_hash = hash_password(default_password)?;

    let employee = Employee::new(
        employee_no,
        request.full_name.trim().to_string(),
        email,
        request.plant_location.trim().to_string(),
        request.department_id.clone(),
        request.designation_id.clone(),
        password_hash,
    );

    db.create_employee_with_grants(&employee, &pairs).await?;

    let grants: Vec<EmployeeGrant> = pairs
        .iter()
        .map(|pair| EmployeeGrant::new(employee.id.clone(), *pair))
        .collect();
    let grant_responses: Vec<GrantResponse> = grants.iter().map(GrantResponse::from).collect();

    Ok(EmployeeResponse::from_employee(&employee, grant_responses))
}

/// Grant pairs a new employee starts with, in canonical module-then-role order.
async fn resolve_onboarding_grants(
    db: &Database,
    department_id: Option<&str>,
    designation_id: Option<&str>,
) -> ApiResult<Vec<GrantPair>> {
    let matched = match (department_id, designation_id) {
        (Some(dept), Some(desig)) => db.get_rules_for_profile(dept, desig).await?,
        _ => Vec::new(),
    };

    if matched.is_empty() {
        return Ok(vec![GrantPair::fallback()]);
    }

    // The unique constraint on rules already prevents duplicates per profile,
    // but canonicalizing keeps the result stable either way.
    Ok(access::canonicalize_pairs(&matched))
}

/// Employees at the caller's plant location, each with their grants.
pub async fn list_employees(
    db: &Database,
    auth: &AuthenticatedEmployee,
) -> ApiResult<EmployeeListResponse> {
    require_system_admin(auth)?;

    let location = &auth.employee.plant_location;
    let employees = db.list_employees_by_location(location).await?;
    let grants = db.get_grants_by_location(location).await?;

    let mut grants_by_employee: HashMap<String, Vec<GrantResponse>> = HashMap::new();
    for grant in &grants {
        grants_by_employee
            .entry(grant.employee_id.clone())
            .or_default()
            .push(GrantResponse::from(grant));
    }

    let total_count = employees.len() as i64;
    let responses: Vec<EmployeeResponse> = employees
        .iter()
        .map(|employee| {
            let employee_grants = grants_by_employee.remove(&employee.id).unwrap_or_default();
            EmployeeResponse::from_employee(employee, employee_grants)
        })
        .collect();

    Ok(EmployeeListResponse {
        employees: responses,
        total_count,
    })
}

/// Grant rows for one employee, for the permissions screen.
pub async fn get_employee_permissions(
    db: &Database,
    employee_id: &str,
) -> ApiResult<Vec<GrantResponse>> {
    if db.get_employee_by_id(employee_id).await?.is_none() {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    let grants = db.get_employee_grants(employee_id).await?;
    Ok(grants.iter().map(GrantResponse::from).collect())
}

/// Store the caller's profile picture as a base64 payload.
pub async fn update_profile_image(
    db: &Database,
    auth: &AuthenticatedEmployee,
    image: &str,
) -> ApiResult<()> {
    validate_image_payload(image)?;
    db.update_profile_image(&auth.employee.id, image).await
}
