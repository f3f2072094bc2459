use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::{location_service, ticket_service},
};

const MODULE: ModuleCode = ModuleCode::Facility;

#[derive(Debug, Deserialize)]
pub struct TechnicianQuery {
    pub location: Option<String>,
}

pub async fn list_tickets(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<TicketListResponse>> {
    let response = ticket_service::list_tickets(&state.db, &auth_employee, MODULE).await?;
    Ok(Json(response))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let ticket =
        ticket_service::create_ticket(&state.db, &auth_employee, MODULE, request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn assign_ticket(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(ticket_id): Path<String>,
    Json(request): Json<AssignTicketRequest>,
) -> ApiResult<Json<Ticket>> {
    let ticket =
        ticket_service::assign_ticket(&state.db, &auth_employee, MODULE, &ticket_id, request)
            .await?;
    Ok(Json(ticket))
}

pub async fn update_status(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(ticket_id): Path<String>,
    Json(request): Json<UpdateTicketStatusRequest>,
) -> ApiResult<Json<Ticket>> {
    let ticket =
        ticket_service::update_status(&state.db, &auth_employee, MODULE, &ticket_id, request)
            .await?;
    Ok(Json(ticket))
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(ticket_id): Path<String>,
) -> ApiResult<StatusCode> {
    ticket_service::delete_ticket(&state.db, &auth_employee, MODULE, &ticket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_technicians(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Query(query): Query<TechnicianQuery>,
) -> ApiResult<Json<Vec<TechnicianResponse>>> {
    let technicians =
        ticket_service::list_technicians(&state.db, &auth_employee, MODULE, query.location)
            .await?;
    Ok(Json(technicians))
}

pub async fn get_master_data(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<MasterDataResponse>> {
    let response = location_service::get_master_data(&state.db, &auth_employee, MODULE).await?;
    Ok(Json(response))
}

pub async fn add_keyword(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateKeywordRequest>,
) -> ApiResult<(StatusCode, Json<Keyword>)> {
    let keyword =
        location_service::add_keyword(&state.db, &auth_employee, MODULE, request).await?;
    Ok((StatusCode::CREATED, Json(keyword)))
}

pub async fn delete_keyword(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(keyword_id): Path<String>,
) -> ApiResult<StatusCode> {
    location_service::delete_keyword(&state.db, &auth_employee, MODULE, &keyword_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
