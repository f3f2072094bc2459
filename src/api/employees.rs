use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::{employee_service, grant_service},
};

/// Employees at the caller's plant location, each with their grants.
pub async fn list_employees(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<EmployeeListResponse>> {
    let response = employee_service::list_employees(&state.db, &auth_employee).await?;
    Ok(Json(response))
}

/// Register an employee. Access grants are seeded from the rules matching
/// their department/designation profile.
pub async fn create_employee(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let response = employee_service::create_employee(
        &state.db,
        &auth_employee,
        &state.default_employee_password,
        request,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Replace an employee's entire grant matrix.
pub async fn replace_access(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<ReplaceAccessRequest>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    let grants = grant_service::replace_access(&state.db, &auth_employee, request).await?;
    Ok(Json(grants))
}
