use crate::{
    api::middleware::error::ApiError,
    database::Database,
    models::{Employee, EmployeeGrant, ModuleCode, RoleCode, Session},
    services::access,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub session_duration_hours: i64,
    pub default_employee_password: String,
}

/// Extract and validate the session token from the Authorization header.
/// On success the request carries an `AuthenticatedEmployee` extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = if let Some(auth_value) = auth_header {
        if let Some(token) = auth_value.strip_prefix("Bearer ") {
            token
        } else {
            return Err(ApiError::Unauthorized);
        }
    } else {
        return Err(ApiError::Unauthorized);
    };

    // Validate session
    let session = match state.db.get_session_by_token(token).await? {
        Some(session) => session,
        None => {
            tracing::debug!("Session token not found");
            return Err(ApiError::Unauthorized);
        }
    };

    if session.is_expired() {
        tracing::debug!("Session expired for employee {}", session.employee_id);
        // Delete expired session
        state.db.delete_session(token).await.ok();
        return Err(ApiError::Unauthorized);
    }

    // Get employee
    let employee = state
        .db
        .get_employee_by_id(&session.employee_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    // Deactivated accounts cannot use existing sessions
    if !employee.is_active {
        tracing::warn!(
            "Session rejected for deactivated account: employee_no={}",
            employee.employee_no
        );
        return Err(ApiError::Unauthorized);
    }

    // Get access grants
    let grants = state.db.get_employee_grants(&employee.id).await?;

    // Clone token before using it (to avoid borrow checker issues)
    let token_owned = token.to_string();

    // Store authenticated employee in request extensions
    request.extensions_mut().insert(AuthenticatedEmployee {
        employee,
        grants,
        session: session.clone(),
        token: token_owned,
    });

    Ok(next.run(request).await)
}

#[derive(Clone)]
pub struct AuthenticatedEmployee {
    pub employee: Employee,
    pub grants: Vec<EmployeeGrant>,
    pub session: Session,
    pub token: String,
}

impl AuthenticatedEmployee {
    /// True when the caller holds this exact module/role grant.
    pub fn has_role(&self, module: ModuleCode, role: RoleCode) -> bool {
        access::has_role(&self.grants, module, role)
    }

    /// True when the caller holds any grant within the module.
    pub fn has_any_role(&self, module: ModuleCode) -> bool {
        access::has_any_role(&self.grants, module)
    }

    /// True when the caller is a system administrator (facility admin).
    pub fn is_system_admin(&self) -> bool {
        access::is_system_admin(&self.grants)
    }
}
