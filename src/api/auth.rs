use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::*,
};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Delegate to auth service
    let auth_result = auth::authenticate(
        &state.db,
        &request.employee_no,
        &request.password,
        state.session_duration_hours,
    )
    .await?;

    let grant_responses: Vec<GrantResponse> =
        auth_result.grants.iter().map(GrantResponse::from).collect();
    let employee_response =
        EmployeeResponse::from_employee(&auth_result.employee, grant_responses);

    Ok(Json(LoginResponse {
        token: auth_result.session.token,
        expires_at: auth_result.session.expires_at,
        employee: employee_response,
    }))
}

/// Pre-activation lookup by badge number.
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    let response = auth::verify_account(&state.db, &request.employee_no).await?;
    Ok(Json(response))
}

/// Set the first real password and activate the account.
pub async fn activate(
    State(state): State<AppState>,
    Json(request): Json<ActivateRequest>,
) -> ApiResult<StatusCode> {
    auth::activate_account(&state.db, &request.employee_no, &request.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<StatusCode> {
    auth::logout(&state.db, &auth_employee.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's own account with grants, for session restore on page load.
pub async fn get_session(
    auth_employee: axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<EmployeeResponse>> {
    let grant_responses: Vec<GrantResponse> =
        auth_employee.grants.iter().map(GrantResponse::from).collect();
    let response = EmployeeResponse::from_employee(&auth_employee.employee, grant_responses);

    Ok(Json(response))
}

/// Grant rows for one employee, for the permissions screen.
pub async fn get_permissions(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<GrantResponse>>> {
    let grants = employee_service::get_employee_permissions(&state.db, &employee_id).await?;
    Ok(Json(grants))
}

pub async fn update_profile_image(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<UpdateProfileImageRequest>,
) -> ApiResult<StatusCode> {
    employee_service::update_profile_image(&state.db, &auth_employee, &request.image).await?;
    Ok(StatusCode::NO_CONTENT)
}
