use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::Database;
use crate::models::{CreateNamedItemRequest, Department, Designation, JobMasterResponse};
use crate::services::validate_required;

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

/// Departments and designations together, for the onboarding form dropdowns
/// and the rules editor.
pub async fn get_job_master(
    db: &Database,
    auth: &AuthenticatedEmployee,
) -> ApiResult<JobMasterResponse> {
    require_system_admin(auth)?;

    let departments = db.list_departments().await?;
    let designations = db.list_designations().await?;

    Ok(JobMasterResponse {
        departments,
        designations,
    })
}

pub async fn add_department(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateNamedItemRequest,
) -> ApiResult<Department> {
    require_system_admin(auth)?;
    validate_required(&request.name, "Department name")?;

    let name = request.name.trim().to_string();
    let existing = db.list_departments().await?;
    if existing.iter().any(|d| d.name.eq_ignore_ascii_case(&name)) {
        return Err(ApiError::Conflict("Department already exists".to_string()));
    }

    let department = Department::new(name);
    db.create_department(&department).await?;

    Ok(department)
}

/// Delete a department. Refused while employees or access rules still
/// reference it.
pub async fn delete_department(
    db: &Database,
    auth: &AuthenticatedEmployee,
    department_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    if db.get_department_by_id(department_id).await?.is_none() {
        return Err(ApiError::NotFound("Department not found".to_string()));
    }

    if db.count_employees_in_department(department_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Department is in use by existing employees".to_string(),
        ));
    }
    if db.count_rules_for_department(department_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Department is in use by access rules".to_string(),
        ));
    }

    db.delete_department(department_id).await?;

    tracing::info!("Department deleted: id={}", department_id);
    Ok(())
}

pub async fn add_designation(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateNamedItemRequest,
) -> ApiResult<Designation> {
    require_system_admin(auth)?;
    validate_required(&request.name, "Designation name")?;

    let name = request.name.trim().to_string();
    let existing = db.list_designations().await?;
    if existing.iter().any(|d| d.name.eq_ignore_ascii_case(&name)) {
        return Err(ApiError::Conflict("Designation already exists".to_string()));
    }

    let designation = Designation::new(name);
    db.create_designation(&designation).await?;

    Ok(designation)
}

pub async fn delete_designation(
    db: &Database,
    auth: &AuthenticatedEmployee,
    designation_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    if db.get_designation_by_id(designation_id).await?.is_none() {
        return Err(ApiError::NotFound("Designation not found".to_string()));
    }

    if db.count_employees_with_designation(designation_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Designation is in use by existing employees".to_string(),
        ));
    }
    if db.count_rules_for_designation(designation_id).await? > 0 {
        return Err(ApiError::Conflict(
            "Designation is in use by access rules".to_string(),
        ));
    }

    db.delete_designation(designation_id).await?;

    tracing::info!("Designation deleted: id={}", designation_id);
    Ok(())
}
