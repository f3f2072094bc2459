use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::org_service,
};

/// Departments and designations for the onboarding form and rules editor.
pub async fn get_job_master(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<JobMasterResponse>> {
    let response = org_service::get_job_master(&state.db, &auth_employee).await?;
    Ok(Json(response))
}

pub async fn add_department(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateNamedItemRequest>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    let department = org_service::add_department(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn delete_department(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(department_id): Path<String>,
) -> ApiResult<StatusCode> {
    org_service::delete_department(&state.db, &auth_employee, &department_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_designation(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateNamedItemRequest>,
) -> ApiResult<(StatusCode, Json<Designation>)> {
    let designation = org_service::add_designation(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(designation)))
}

pub async fn delete_designation(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(designation_id): Path<String>,
) -> ApiResult<StatusCode> {
    org_service::delete_designation(&state.db, &auth_employee, &designation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
