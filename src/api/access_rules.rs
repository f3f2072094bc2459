use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::middleware::{ApiResult, AppState, AuthenticatedEmployee},
    models::*,
    services::rule_service,
};

/// All default-access rules with their profile names.
pub async fn list_rules(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
) -> ApiResult<Json<Vec<AccessRuleResponse>>> {
    let rules = rule_service::list_rules(&state.db, &auth_employee).await?;
    Ok(Json(rules))
}

/// Add rules for one department/designation profile.
pub async fn create_rules(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Json(request): Json<CreateAccessRuleRequest>,
) -> ApiResult<(StatusCode, Json<Vec<AccessRuleResponse>>)> {
    let rules = rule_service::create_rules(&state.db, &auth_employee, request).await?;
    Ok((StatusCode::CREATED, Json(rules)))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    axum::Extension(auth_employee): axum::Extension<AuthenticatedEmployee>,
    Path(rule_id): Path<String>,
) -> ApiResult<StatusCode> {
    rule_service::delete_rule(&state.db, &auth_employee, &rule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
