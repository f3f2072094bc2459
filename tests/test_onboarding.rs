mod helpers;

use helpers::*;
use maintdesk::models::{
    CreateAccessRuleRequest, CreateEmployeeRequest, GrantPair, ModuleCode, RoleCode,
};
use maintdesk::services::{employee_service, rule_service};

fn registration(
    employee_no: &str,
    department_id: Option<&str>,
    designation_id: Option<&str>,
) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        employee_no: employee_no.to_string(),
        full_name: format!("Employee {}", employee_no),
        email: format!("{}@example.com", employee_no.to_lowercase()),
        plant_location: PLANT_A.to_string(),
        department_id: department_id.map(String::from),
        designation_id: designation_id.map(String::from),
    }
}

#[tokio::test]
async fn test_matching_rules_seed_the_grants() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    rule_service::create_rules(
        &db,
        &admin,
        CreateAccessRuleRequest {
            department_id: DEPT_MAINTENANCE.to_string(),
            designation_id: DESIG_SUPERVISOR.to_string(),
            grants: vec![
                GrantPair::new(ModuleCode::Facility, RoleCode::Planner),
                GrantPair::new(ModuleCode::Safety, RoleCode::Planner),
            ],
        },
    )
    .await
    .unwrap();

    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-500", Some(DEPT_MAINTENANCE), Some(DESIG_SUPERVISOR)),
    )
    .await
    .unwrap();

    assert_eq!(created.grants.len(), 2);
    assert_eq!(created.grants[0].module_code, ModuleCode::Facility);
    assert_eq!(created.grants[0].role_code, RoleCode::Planner);
    assert_eq!(created.grants[1].module_code, ModuleCode::Safety);
    assert_eq!(created.grants[1].role_code, RoleCode::Planner);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_unmatched_profile_falls_back_to_facility_requester() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    // No rules exist for Production/Fitter
    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-510", Some(DEPT_PRODUCTION), Some(DESIG_FITTER)),
    )
    .await
    .unwrap();

    assert_eq!(created.grants.len(), 1);
    assert_eq!(created.grants[0].module_code, ModuleCode::Facility);
    assert_eq!(created.grants[0].role_code, RoleCode::Requester);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_rules_require_both_department_and_designation() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    rule_service::create_rules(
        &db,
        &admin,
        CreateAccessRuleRequest {
            department_id: DEPT_MAINTENANCE.to_string(),
            designation_id: DESIG_SUPERVISOR.to_string(),
            grants: vec![GrantPair::new(ModuleCode::Safety, RoleCode::Admin)],
        },
    )
    .await
    .unwrap();

    // Department alone never matches a rule
    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-520", Some(DEPT_MAINTENANCE), None),
    )
    .await
    .unwrap();

    assert_eq!(created.grants.len(), 1);
    assert_eq!(created.grants[0].module_code, ModuleCode::Facility);
    assert_eq!(created.grants[0].role_code, RoleCode::Requester);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_rules_for_other_profiles_do_not_leak() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    rule_service::create_rules(
        &db,
        &admin,
        CreateAccessRuleRequest {
            department_id: DEPT_MAINTENANCE.to_string(),
            designation_id: DESIG_SUPERVISOR.to_string(),
            grants: vec![GrantPair::new(ModuleCode::Facility, RoleCode::Admin)],
        },
    )
    .await
    .unwrap();

    // Same department, different designation
    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-530", Some(DEPT_MAINTENANCE), Some(DESIG_FITTER)),
    )
    .await
    .unwrap();

    assert_eq!(created.grants.len(), 1);
    assert_eq!(created.grants[0].role_code, RoleCode::Requester);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_seeded_grants_come_back_in_canonical_order() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    // Rules submitted in scrambled order
    rule_service::create_rules(
        &db,
        &admin,
        CreateAccessRuleRequest {
            department_id: DEPT_PRODUCTION.to_string(),
            designation_id: DESIG_FITTER.to_string(),
            grants: vec![
                GrantPair::new(ModuleCode::Safety, RoleCode::Technician),
                GrantPair::new(ModuleCode::Facility, RoleCode::Requester),
                GrantPair::new(ModuleCode::Facility, RoleCode::Technician),
            ],
        },
    )
    .await
    .unwrap();

    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-540", Some(DEPT_PRODUCTION), Some(DESIG_FITTER)),
    )
    .await
    .unwrap();

    let pairs: Vec<(ModuleCode, RoleCode)> = created
        .grants
        .iter()
        .map(|g| (g.module_code, g.role_code))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (ModuleCode::Facility, RoleCode::Technician),
            (ModuleCode::Facility, RoleCode::Requester),
            (ModuleCode::Safety, RoleCode::Technician),
        ]
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_deleting_a_rule_leaves_existing_grants_alone() {
    let db = setup_test_db().await;
    let admin = create_system_admin(&db, PLANT_A).await;

    let rules = rule_service::create_rules(
        &db,
        &admin,
        CreateAccessRuleRequest {
            department_id: DEPT_MAINTENANCE.to_string(),
            designation_id: DESIG_FITTER.to_string(),
            grants: vec![GrantPair::new(ModuleCode::Facility, RoleCode::Technician)],
        },
    )
    .await
    .unwrap();

    let created = employee_service::create_employee(
        &db,
        &admin,
        "12345",
        registration("EMP-550", Some(DEPT_MAINTENANCE), Some(DESIG_FITTER)),
    )
    .await
    .unwrap();

    rule_service::delete_rule(&db, &admin, &rules[0].id)
        .await
        .unwrap();

    // Rules only shape accounts created after them
    let grants = db.get_employee_grants(&created.id).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].role_code, RoleCode::Technician);

    teardown_test_db(db).await;
}
