use std::collections::BTreeSet;

use crate::api::middleware::{ApiError, ApiResult, AuthenticatedEmployee};
use crate::database::Database;
use crate::models::{AccessRule, AccessRuleResponse, CreateAccessRuleRequest, GrantPair};

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

/// Add default-access rules for one department/designation profile.
/// Duplicate pairs within the request collapse to one rule; pairs already
/// stored for the profile are rejected.
pub async fn create_rules(
    db: &Database,
    auth: &AuthenticatedEmployee,
    request: CreateAccessRuleRequest,
) -> ApiResult<Vec<AccessRuleResponse>> {
    require_system_admin(auth)?;

    let department = db
        .get_department_by_id(&request.department_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Unknown department".to_string()))?;
    let designation = db
        .get_designation_by_id(&request.designation_id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Unknown designation".to_string()))?;

    if request.grants.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one module/role pair is required".to_string(),
        ));
    }

    let requested: BTreeSet<GrantPair> = request.grants.iter().copied().collect();

    let existing: BTreeSet<GrantPair> = db
        .get_rules_for_profile(&department.id, &designation.id)
        .await?
        .into_iter()
        .collect();

    if let Some(duplicate) = requested.iter().find(|pair| existing.contains(pair)) {
        return Err(ApiError::Conflict(format!(
            "Rule {}/{} already exists for this profile",
            duplicate.module_code, duplicate.role_code
        )));
    }

    let rules: Vec<AccessRule> = requested
        .into_iter()
        .map(|pair| AccessRule::new(department.id.clone(), designation.id.clone(), pair))
        .collect();

    db.create_access_rules(&rules).await?;

    Ok(rules
        .into_iter()
        .map(|rule| AccessRuleResponse {
            id: rule.id,
            department_id: rule.department_id,
            department_name: department.name.clone(),
            designation_id: rule.designation_id,
            designation_name: designation.name.clone(),
            module_code: rule.module_code,
            role_code: rule.role_code,
        })
        .collect())
}

/// Every stored rule with its profile names, one row per grant pair.
pub async fn list_rules(
    db: &Database,
    auth: &AuthenticatedEmployee,
) -> ApiResult<Vec<AccessRuleResponse>> {
    require_system_admin(auth)?;

    let rows = db.list_access_rules().await?;

    Ok(rows
        .into_iter()
        .map(|(rule, department_name, designation_name)| AccessRuleResponse {
            id: rule.id,
            department_id: rule.department_id,
            department_name,
            designation_id: rule.designation_id,
            designation_name,
            module_code: rule.module_code,
            role_code: rule.role_code,
        })
        .collect())
}

/// Remove one rule row. Existing employee grants are untouched; rules only
/// shape accounts created after them.
pub async fn delete_rule(
    db: &Database,
    auth: &AuthenticatedEmployee,
    rule_id: &str,
) -> ApiResult<()> {
    require_system_admin(auth)?;

    let deleted = db.delete_access_rule(rule_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Rule not found".to_string()));
    }

    tracing::info!("Access rule deleted: id={}", rule_id);
    Ok(())
}
