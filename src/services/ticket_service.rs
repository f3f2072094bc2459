use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::tickets::TicketRepository;
use crate::database::Database;
use crate::models::{
    AssignTicketRequest, CreateTicketRequest, ModuleCode, RoleCode, TechnicianResponse, Ticket,
    TicketListResponse, TicketStatus, UpdateTicketStatusRequest,
};
use crate::services::{access, validate_image_payload, validate_required};

fn require_module_access(auth: &AuthenticatedEmployee, module: ModuleCode) -> ApiResult<()> {
    if !auth.has_any_role(module) {
        tracing::warn!(
            "Permission denied: {} has no role in the {} module",
            auth.employee.employee_no,
            module
        );
        return Err(ApiError::Forbidden(format!(
            "No access to the {} module",
            module
        )));
    }
    Ok(())
}

fn require_planner(auth: &AuthenticatedEmployee, module: ModuleCode) -> ApiResult<()> {
    let allowed =
        auth.has_role(module, RoleCode::Planner) || auth.has_role(module, RoleCode::Admin);
    if !allowed {
        tracing::warn!(
            "Permission denied: {} is not a {} planner or administrator",
            auth.employee.employee_no,
            module
        );
        return Err(ApiError::Forbidden(
            "Requires a planner or administrator role".to_string(),
        ));
    }
    Ok(())
}

/// Raise a ticket. Building, area and sub-area arrive as master-data ids and
/// are snapshotted into the ticket by name, so tickets keep their wording
/// even after the master data changes.
pub async fn create_ticket(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    request: CreateTicketRequest,
) -> ApiResult<Ticket> {
    require_module_access(auth, module)?;
    validate_required(&request.keyword, "Keyword")?;

    let building = db
        .get_building_by_id(&request.building_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Unknown building".to_string()))?;
    if building.plant_location != auth.employee.plant_location {
        return Err(ApiError::BadRequest(
            "Building is not at your plant location".to_string(),
        ));
    }

    let area_name = match &request.area_id {
        Some(area_id) => {
            let area = db
                .get_area_by_id(area_id)
                .await?
                .ok_or_else(|| ApiError::BadRequest("Unknown area".to_string()))?;
            if area.building_id != building.id {
                return Err(ApiError::BadRequest(
                    "Area does not belong to the selected building".to_string(),
                ));
            }
            Some(area.name)
        }
        None => None,
    };

    let sub_area_name = match (&request.sub_area_id, &request.area_id) {
        (Some(sub_area_id), Some(area_id)) => {
            let sub_area = db
                .get_sub_area_by_id(sub_area_id)
                .await?
                .ok_or_else(|| ApiError::BadRequest("Unknown sub-area".to_string()))?;
            if &sub_area.area_id != area_id {
                return Err(ApiError::BadRequest(
                    "Sub-area does not belong to the selected area".to_string(),
                ));
            }
            Some(sub_area.name)
        }
        (Some(_), None) => {
            return Err(ApiError::BadRequest(
                "Sub-area requires an area".to_string(),
            ));
        }
        _ => None,
    };

    let image_data = match &request.image {
        Some(image) => {
            if module != ModuleCode::Safety {
                return Err(ApiError::BadRequest(
                    "Images are only supported on safety tickets".to_string(),
                ));
            }
            validate_image_payload(image)?;
            Some(image.clone())
        }
        None => None,
    };

    let ticket = Ticket::new(
        auth.employee.id.clone(),
        auth.employee.full_name.clone(),
        auth.employee.plant_location.clone(),
        building.name,
        area_name,
        sub_area_name,
        request.keyword.trim().to_string(),
        request.description.clone(),
        image_data,
    );

    db.create_ticket(module, &ticket).await
}

/// Tickets at the caller's plant location, newest first.
pub async fn list_tickets(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
) -> ApiResult<TicketListResponse> {
    require_module_access(auth, module)?;

    let tickets = db
        .list_tickets_by_location(module, &auth.employee.plant_location)
        .await?;
    let total_count = tickets.len() as i64;

    Ok(TicketListResponse {
        tickets,
        total_count,
    })
}

/// Hand a ticket to a technician. Records who planned the assignment and
/// snapshots the technician's name onto the ticket.
pub async fn assign_ticket(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    ticket_id: &str,
    request: AssignTicketRequest,
) -> ApiResult<Ticket> {
    require_planner(auth, module)?;

    let technician = db
        .get_employee_by_id(&request.technician_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Technician not found".to_string()))?;

    let technician_grants = db.get_employee_grants(&technician.id).await?;
    if !access::has_role(&technician_grants, module, RoleCode::Technician) {
        return Err(ApiError::BadRequest(format!(
            "{} is not a technician in the {} module",
            technician.full_name, module
        )));
    }

    db.assign_ticket(
        module,
        ticket_id,
        &technician.id,
        &technician.full_name,
        &auth.employee.full_name,
    )
    .await?;

    db.get_ticket_by_id(module, ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))
}

/// Move a ticket to a new status. Planners and admins may always do this;
/// a technician may update only tickets assigned to them.
pub async fn update_status(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    ticket_id: &str,
    request: UpdateTicketStatusRequest,
) -> ApiResult<Ticket> {
    require_module_access(auth, module)?;

    let status: TicketStatus = request
        .status
        .parse()
        .map_err(|e: String| ApiError::BadRequest(e))?;

    let ticket = db
        .get_ticket_by_id(module, ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

    let is_planner = auth.has_role(module, RoleCode::Planner)
        || auth.has_role(module, RoleCode::Admin);
    let is_assignee = auth.has_role(module, RoleCode::Technician)
        && ticket.assigned_to_id.as_deref() == Some(auth.employee.id.as_str());
    if !is_planner && !is_assignee {
        tracing::warn!(
            "Permission denied: {} may not move ticket {} to {}",
            auth.employee.employee_no,
            ticket_id,
            status
        );
        return Err(ApiError::Forbidden(
            "Only planners or the assigned technician can update this ticket".to_string(),
        ));
    }

    db.update_ticket_status(module, ticket_id, status).await?;

    db.get_ticket_by_id(module, ticket_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))
}

/// Remove a ticket outright. Administrators only.
pub async fn delete_ticket(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    ticket_id: &str,
) -> ApiResult<()> {
    if !auth.has_role(module, RoleCode::Admin) {
        tracing::warn!(
            "Permission denied: {} is not a {} administrator",
            auth.employee.employee_no,
            module
        );
        return Err(ApiError::Forbidden(
            "Requires an administrator role".to_string(),
        ));
    }

    let deleted = db.delete_ticket(module, ticket_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Ticket not found".to_string()));
    }

    tracing::info!("Ticket deleted: module={}, id={}", module, ticket_id);
    Ok(())
}

/// Technicians a planner can assign to, scoped to one plant location.
pub async fn list_technicians(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    plant_location: Option<String>,
) -> ApiResult<Vec<TechnicianResponse>> {
    require_planner(auth, module)?;

    let location = plant_location.unwrap_or_else(|| auth.employee.plant_location.clone());
    let technicians = db.get_technicians(module, &location).await?;

    Ok(technicians
        .into_iter()
        .map(|employee| TechnicianResponse {
            id: employee.id,
            employee_no: employee.employee_no,
            full_name: employee.full_name,
        })
        .collect())
}
