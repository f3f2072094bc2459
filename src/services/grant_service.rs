use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::Database;
use crate::models::{GrantResponse, ReplaceAccessRequest};
use crate::services::access;

/// Replace an employee's entire grant set with the submitted matrix. Only
/// system administrators may save a matrix, so no module admin can widen
/// their own grants.
///
/// The whole set is swapped in one transaction: a failed save never leaves
/// the employee with a partial mix of old and new grants. An empty matrix is
/// legal and removes all access.
pub async fn replace_access(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: ReplaceAccessRequest,
) -> ApiResult<Vec<GrantResponse>> {
    if !auth.is_system_admin() {
        tracing::warn!(
            "Permission denied: {} is not a system administrator",
            auth.employee.employee_no
        );
        return Err(ApiError::Forbidden(
            "Requires system administrator access".to_string(),
        ));
    }

    let employee = db
        .get_employee_by_id(&request.employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let pairs = access::canonicalize_pairs(&request.grants);
    db.replace_employee_grants(&employee.id, &pairs).await?;

    let grants = db.get_employee_grants(&employee.id).await?;
    Ok(grants.iter().map(GrantResponse::from).collect())
}
