mod helpers;

use helpers::*;
use maintdesk::api::middleware::ApiError;
use maintdesk::models::{
    CreateAccessRuleRequest, CreateEmployeeRequest, CreateNamedItemRequest, GrantPair, ModuleCode,
    RoleCode,
};
use maintdesk::services::{employee_service, org_service, rule_service};

fn rule_request(department_id: &str, designation_id: &str, grants: Vec<GrantPair>) -> CreateAccessRuleRequest {
    CreateAccessRuleRequest {
        department_id: department_id.to_string(),
        designation_id: designation_id.to_string(),
        grants,
    }
}

#[tokio::test]
async fn test_create_and_list_rules() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_PRODUCTION,
            DESIG_FITTER,
            vec![GrantPair::new(ModuleCode::Safety, RoleCode::Technician)],
        ),
    )
    .await
    .unwrap();

    rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_MAINTENANCE,
            DESIG_SUPERVISOR,
            vec![
                GrantPair::new(ModuleCode::Facility, RoleCode::Planner),
                GrantPair::new(ModuleCode::Safety, RoleCode::Planner),
            ],
        ),
    )
    .await
    .unwrap();

    let rules = rule_service::list_rules(&db, &admin).await.unwrap();
    assert_eq!(rules.len(), 3);

    // Listed by department name, so Maintenance rows come before Production
    assert_eq!(rules[0].department_name, "Maintenance");
    assert_eq!(rules[0].designation_name, "Supervisor");
    assert_eq!(rules[2].department_name, "Production");
    assert_eq!(rules[2].designation_name, "Fitter");
    assert_eq!(rules[2].module_code, ModuleCode::Safety);
    assert_eq!(rules[2].role_code, RoleCode::Technician);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_duplicate_rule_for_profile_rejected() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_MAINTENANCE,
            DESIG_FITTER,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Technician)],
        ),
    )
    .await
    .unwrap();

    let result = rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_MAINTENANCE,
            DESIG_FITTER,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Technician)],
        ),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_rules_require_system_admin() {
    let db = setup_test_db().await;

    // Admin in safety does not carry the system administrator pair
    let safety_admin = create_auth_employee(
        &db,
        "ADM-SAF-2",
        PLANT_A,
        &[pair(ModuleCode::Safety, RoleCode::Admin)],
    )
    .await;

    let result = rule_service::create_rules(
        &db,
        &safety_admin,
        rule_request(
            DEPT_MAINTENANCE,
            DESIG_SUPERVISOR,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Planner)],
        ),
    )
    .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    // Facility admin alone is the system administrator
    let facility_admin = create_auth_employee(
        &db,
        "ADM-FAC-2",
        PLANT_A,
        &[pair(ModuleCode::Facility, RoleCode::Admin)],
    )
    .await;

    let created = rule_service::create_rules(
        &db,
        &facility_admin,
        rule_request(
            DEPT_MAINTENANCE,
            DESIG_SUPERVISOR,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Planner)],
        ),
    )
    .await;
    assert!(created.is_ok());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_create_rules_unknown_profile() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let result = rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            "no-such-department",
            DESIG_SUPERVISOR,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Planner)],
        ),
    )
    .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_create_rules_requires_at_least_one_pair() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let result = rule_service::create_rules(
        &db,
        &admin,
        rule_request(DEPT_MAINTENANCE, DESIG_SUPERVISOR, vec![]),
    )
    .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_delete_rule_twice() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let rules = rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_PRODUCTION,
            DESIG_SUPERVISOR,
            vec![GrantPair::new(ModuleCode::Safety, RoleCode::Planner)],
        ),
    )
    .await
    .unwrap();

    rule_service::delete_rule(&db, &admin, &rules[0].id)
        .await
        .unwrap();

    let result = rule_service::delete_rule(&db, &admin, &rules[0].id).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_department_referenced_by_rules_cannot_be_deleted() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let rules = rule_service::create_rules(
        &db,
        &admin,
        rule_request(
            DEPT_PRODUCTION,
            DESIG_FITTER,
            vec![GrantPair::new(ModuleCode::Facility, RoleCode::Requester)],
        ),
    )
    .await
    .unwrap();

    let result = org_service::delete_department(&db, &admin, DEPT_PRODUCTION).await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    // Once the rule is gone the department can be removed
    rule_service::delete_rule(&db, &admin, &rules[0].id)
        .await
        .unwrap();
    org_service::delete_department(&db, &admin, DEPT_PRODUCTION)
        .await
        .unwrap();

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_department_with_employees_cannot_be_deleted() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    employee_service::create_employee(
        &db,
        &admin,
        "12345",
        CreateEmployeeRequest {
            employee_no: "EMP-700".to_string(),
            full_name: "Dele Obi".to_string(),
            email: "dele.obi@example.com".to_string(),
            plant_location: PLANT_A.to_string(),
            department_id: Some(DEPT_MAINTENANCE.to_string()),
            designation_id: None,
        },
    )
    .await
    .unwrap();

    let result = org_service::delete_department(&db, &admin, DEPT_MAINTENANCE).await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_add_department_duplicate_name() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let result = org_service::add_department(
        &db,
        &admin,
        CreateNamedItemRequest {
            name: "maintenance".to_string(),
        },
    )
    .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_job_master_lists_departments_and_designations() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let job_master = org_service::get_job_master(&db, &admin).await.unwrap();
    assert_eq!(job_master.departments.len(), 2);
    assert_eq!(job_master.designations.len(), 2);
    assert_eq!(job_master.departments[0].name, "Maintenance");
    assert_eq!(job_master.designations[0].name, "Fitter");

    let requester = create_auth_employee(
        &db,
        "USR-3",
        PLANT_A,
        &[pair(ModuleCode::Facility, RoleCode::Requester)],
    )
    .await;
    let result = org_service::get_job_master(&db, &requester).await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    teardown_test_db(db).await;
}
