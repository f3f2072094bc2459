use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::location_service,
};

// Buildings, areas and sub-areas are shared by both ticket modules, so their
// maintenance lives under the admin surface.

pub async fn add_building(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateBuildingRequest>,
) -> ApiResult<(StatusCode, Json<Building>)> {
    let building = location_service::add_building(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

pub async fn delete_building(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(building_id): Path<String>,
) -> ApiResult<StatusCode> {
    location_service::delete_building(&state.db, &auth_employee, &building_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_area(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateAreaRequest>,
) -> ApiResult<(StatusCode, Json<Area>)> {
    let area = location_service::add_area(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

pub async fn delete_area(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(area_id): Path<String>,
) -> ApiResult<StatusCode> {
    location_service::delete_area(&state.db, &auth_employee, &area_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_sub_area(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateSubAreaRequest>,
) -> ApiResult<(StatusCode, Json<SubArea>)> {
    let sub_area = location_service::add_sub_area(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(sub_area)))
}

pub async fn delete_sub_area(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(sub_area_id): Path<String>,
) -> ApiResult<StatusCode> {
    location_service::delete_sub_area(&state.db, &auth_employee, &sub_area_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
