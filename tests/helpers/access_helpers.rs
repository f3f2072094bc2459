use maintdesk::api::middleware::AuthenticatedEmployee;
use maintdesk::database::Database;
use maintdesk::models::{Employee, GrantPair, ModuleCode, RoleCode, Session};
use maintdesk::services::auth::generate_session_token;

/// Create an activated employee with the given grants and a live session,
/// ready to be passed to service functions as the caller.
pub async fn create_auth_employee(
    db: &Database,
    employee_no: &str,
    plant_location: &str,
    pairs: &[GrantPair],
) -> AuthenticatedEmployee {
    let mut employee = Employee::new(
        employee_no.to_string(),
        format!("Test {}", employee_no),
        format!("{}@example.com", employee_no.to_lowercase()),
        plant_location.to_string(),
        None,
        None,
        "hash".to_string(),
    );
    employee.is_active = true;

    db.create_employee_with_grants(&employee, pairs)
        .await
        .expect("Failed to create employee");

    let grants = db
        .get_employee_grants(&employee.id)
        .await
        .expect("Failed to load grants");

    let token = generate_session_token();
    let session = Session::new(employee.id.clone(), token.clone(), 9);
    db.create_session(&session)
        .await
        .expect("Failed to create session");

    AuthenticatedEmployee {
        employee,
        grants,
        session,
        token,
    }
}

/// Admin in both modules, the strongest caller the system knows.
pub async fn create_system_admin(db: &Database, plant_location: &str) -> AuthenticatedEmployee {
    let employee_no = format!("SYS-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    create_auth_employee(
        db,
        &employee_no,
        plant_location,
        &[
            GrantPair::new(ModuleCode::Facility, RoleCode::Admin),
            GrantPair::new(ModuleCode::Safety, RoleCode::Admin),
        ],
    )
    .await
}

pub fn pair(module: ModuleCode, role: RoleCode) -> GrantPair {
    GrantPair::new(module, role)
}
