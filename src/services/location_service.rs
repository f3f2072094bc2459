use std::collections::HashMap;

use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::Database;
use crate::models::{
    Area, AreaNode, Building, BuildingNode, CreateAreaRequest, CreateBuildingRequest,
    CreateKeywordRequest, CreateSubAreaRequest, Keyword, MasterDataResponse, ModuleCode, RoleCode,
    SubArea, SubAreaNode,
};
use crate::services::validate_required;

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

// Buildings, areas and sub-areas are shared between modules; maintaining
// the tree is system administration, not module administration.
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

fn require_module_admin(auth: &AuthenticatedEmployee, module: ModuleCode) -> ApiResult<()> {
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
    Ok(())
}

/// The dropdown tree for the ticket form: buildings at the caller's plant
/// location with their areas and sub-areas, plus the module's keyword list.
pub async fn get_master_data(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
) -> ApiResult<MasterDataResponse> {
    require_module_access(auth, module)?;

    let location = &auth.employee.plant_location;
    let buildings = db.list_buildings_by_location(location).await?;
    let areas = db.list_areas_by_location(location).await?;
    let sub_areas = db.list_sub_areas_by_location(location).await?;
    let keywords = db.list_keywords(module).await?;

    let mut sub_areas_by_area: HashMap<String, Vec<SubAreaNode>> = HashMap::new();
    for sub_area in sub_areas {
        sub_areas_by_area
            .entry(sub_area.area_id.clone())
            .or_default()
            .push(SubAreaNode {
                id: sub_area.id,
                name: sub_area.name,
            });
    }

    let mut areas_by_building: HashMap<String, Vec<AreaNode>> = HashMap::new();
    for area in areas {
        let node = AreaNode {
            sub_areas: sub_areas_by_area.remove(&area.id).unwrap_or_default(),
            id: area.id,
            name: area.name,
        };
        areas_by_building
            .entry(area.building_id.clone())
            .or_default()
            .push(node);
    }

    let locations: Vec<BuildingNode> = buildings
        .into_iter()
        .map(|building| BuildingNode {
            areas: areas_by_building.remove(&building.id).unwrap_or_default(),
            id: building.id,
            name: building.name,
        })
        .collect();

    Ok(MasterDataResponse {
        locations,
        keywords: keywords.into_iter().map(|k| k.name).collect(),
    })
}

pub async fn add_building(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateBuildingRequest,
) -> ApiResult<Building> {
    require_system_admin(auth)?;
    validate_required(&request.name, "Building name")?;
    validate_required(&request.plant_location, "Plant location")?;

    let name = request.name.trim().to_string();
    let plant_location = request.plant_location.trim().to_string();

    let existing = db.list_buildings_by_location(&plant_location).await?;
    if existing.iter().any(|b| b.name.eq_ignore_ascii_case(&name)) {
        return Err(ApiError::Conflict(
            "Building already exists at this location".to_string(),
        ));
    }

    let building = Building::new(name, plant_location);
    db.create_building(&building).await?;

    Ok(building)
}

/// Delete a building. Its areas and sub-areas go with it; existing tickets
/// keep the snapshotted names.
pub async fn delete_building(
    db: &Database,
    auth: &AuthenticatedEmployee,
    building_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    let deleted = db.delete_building(building_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Building not found".to_string()));
    }

    tracing::info!("Building deleted: id={}", building_id);
    Ok(())
}

pub async fn add_area(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateAreaRequest,
) -> ApiResult<Area> {
    require_system_admin(auth)?;
    validate_required(&request.name, "Area name")?;

    if db.get_building_by_id(&request.building_id).await?.is_none() {
        return Err(ApiError::BadRequest("Unknown building".to_string()));
    }

    let area = Area::new(request.building_id, request.name.trim().to_string());
    db.create_area(&area).await?;

    Ok(area)
}

pub async fn delete_area(
    db: &Database,
    auth: &AuthenticatedEmployee,
    area_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    let deleted = db.delete_area(area_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Area not found".to_string()));
    }

    tracing::info!("Area deleted: id={}", area_id);
    Ok(())
}

pub async fn add_sub_area(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateSubAreaRequest,
) -> ApiResult<SubArea> {
    require_system_admin(auth)?;
    validate_required(&request.name, "Sub-area name")?;

    if db.get_area_by_id(&request.area_id).await?.is_none() {
        return Err(ApiError::BadRequest("Unknown area".to_string()));
    }

    let sub_area = SubArea::new(request.area_id, request.name.trim().to_string());
    db.create_sub_area(&sub_area).await?;

    Ok(sub_area)
}

pub async fn delete_sub_area(
    db: &Database,
    auth: &AuthenticatedEmployee,
    sub_area_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    let deleted = db.delete_sub_area(sub_area_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Sub-area not found".to_string()));
    }

    tracing::info!("Sub-area deleted: id={}", sub_area_id);
    Ok(())
}

pub async fn add_keyword(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    request: CreateKeywordRequest,
) -> ApiResult<Keyword> {
    require_module_admin(auth, module)?;
    validate_required(&request.name, "Keyword")?;

    let name = request.name.trim().to_string();
    let existing = db.list_keywords(module).await?;
    if existing.iter().any(|k| k.name.eq_ignore_ascii_case(&name)) {
        return Err(ApiError::Conflict("Keyword already exists".to_string()));
    }

    let keyword = Keyword::new(name);
    db.create_keyword(module, &keyword).await?;

    Ok(keyword)
}

pub async fn delete_keyword(
    db: &Database,
    auth: &AuthenticatedEmployee,
    module: ModuleCode,
    keyword_id: &str,
) -> ApiResult<()> {
    require_module_admin(auth, module)?;

    let deleted = db.delete_keyword(module, keyword_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Keyword not found".to_string()));
    }

    tracing::info!("Keyword deleted: module={}, id={}", module, keyword_id);
    Ok(())
}
