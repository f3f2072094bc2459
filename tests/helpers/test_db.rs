use maintdesk::database::Database;

// Fixed ids seeded into every test database
pub const DEPT_MAINTENANCE: &str = "00000000-0000-0000-0000-000000000001";
pub const DEPT_PRODUCTION: &str = "00000000-0000-0000-0000-000000000002";
pub const DESIG_SUPERVISOR: &str = "10000000-0000-0000-0000-000000000001";
pub const DESIG_FITTER: &str = "10000000-0000-0000-0000-000000000002";
pub const BUILDING_MAIN: &str = "20000000-0000-0000-0000-000000000001";
pub const AREA_COMPRESSOR: &str = "30000000-0000-0000-0000-000000000001";
pub const SUB_AREA_BAY1: &str = "40000000-0000-0000-0000-000000000001";
pub const PLANT_A: &str = "PLANT-A";

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // Use file-based SQLite for tests (unique UUID per test for parallel execution)
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations manually
    setup_schema(&db).await;
    seed_test_data(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE departments (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create departments table");

    sqlx::query(
        "CREATE TABLE designations (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create designations table");

    sqlx::query(
        "CREATE TABLE employees (
            id TEXT PRIMARY KEY,
            employee_no TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            plant_location TEXT NOT NULL,
            department_id TEXT,
            designation_id TEXT,
            password_hash TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0,
            profile_image TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (department_id) REFERENCES departments(id),
            FOREIGN KEY (designation_id) REFERENCES designations(id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create employees table");

    sqlx::query("CREATE INDEX idx_employees_no ON employees(employee_no)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE employee_grants (
            employee_id TEXT NOT NULL,
            module_code TEXT NOT NULL CHECK(module_code IN ('FAC', 'SAF')),
            role_code TEXT NOT NULL CHECK(role_code IN ('ADM', 'PLN', 'TEC', 'USR')),
            created_at TEXT NOT NULL,
            PRIMARY KEY (employee_id, module_code, role_code),
            FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create employee_grants table");

    sqlx::query(
        "CREATE TABLE access_rules (
            id TEXT PRIMARY KEY,
            department_id TEXT NOT NULL,
            designation_id TEXT NOT NULL,
            module_code TEXT NOT NULL CHECK(module_code IN ('FAC', 'SAF')),
            role_code TEXT NOT NULL CHECK(role_code IN ('ADM', 'PLN', 'TEC', 'USR')),
            created_at TEXT NOT NULL,
            UNIQUE (department_id, designation_id, module_code, role_code),
            FOREIGN KEY (department_id) REFERENCES departments(id),
            FOREIGN KEY (designation_id) REFERENCES designations(id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create access_rules table");

    sqlx::query(
        "CREATE TABLE sessions (
            id TEXT PRIMARY KEY,
            employee_id TEXT NOT NULL,
            token TEXT NOT NULL UNIQUE,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create sessions table");

    sqlx::query(
        "CREATE TABLE buildings (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            plant_location TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (name, plant_location)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create buildings table");

    sqlx::query(
        "CREATE TABLE areas (
            id TEXT PRIMARY KEY,
            building_id TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (building_id, name),
            FOREIGN KEY (building_id) REFERENCES buildings(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create areas table");

    sqlx::query(
        "CREATE TABLE sub_areas (
            id TEXT PRIMARY KEY,
            area_id TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (area_id, name),
            FOREIGN KEY (area_id) REFERENCES areas(id) ON DELETE CASCADE
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create sub_areas table");

    sqlx::query(
        "CREATE TABLE issue_keywords (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create issue_keywords table");

    sqlx::query(
        "CREATE TABLE hazard_keywords (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create hazard_keywords table");

    sqlx::query(
        "CREATE TABLE facility_tickets (
            id TEXT PRIMARY KEY,
            ticket_number INTEGER NOT NULL UNIQUE,
            raiser_id TEXT NOT NULL,
            raiser_name TEXT NOT NULL,
            plant_location TEXT NOT NULL,
            building_name TEXT NOT NULL,
            area_name TEXT,
            sub_area_name TEXT,
            keyword TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open', 'assigned', 'in_progress', 'completed', 'closed')),
            assigned_to_id TEXT,
            assigned_to_name TEXT,
            planned_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (raiser_id) REFERENCES employees(id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create facility_tickets table");

    sqlx::query(
        "CREATE TABLE safety_tickets (
            id TEXT PRIMARY KEY,
            ticket_number INTEGER NOT NULL UNIQUE,
            raiser_id TEXT NOT NULL,
            raiser_name TEXT NOT NULL,
            plant_location TEXT NOT NULL,
            building_name TEXT NOT NULL,
            area_name TEXT,
            sub_area_name TEXT,
            keyword TEXT NOT NULL,
            description TEXT,
            image_data TEXT,
            status TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open', 'assigned', 'in_progress', 'completed', 'closed')),
            assigned_to_id TEXT,
            assigned_to_name TEXT,
            planned_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (raiser_id) REFERENCES employees(id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create safety_tickets table");
}

async fn seed_test_data(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "INSERT INTO departments (id, name, created_at) VALUES
        ('00000000-0000-0000-0000-000000000001', 'Maintenance', datetime('now')),
        ('00000000-0000-0000-0000-000000000002', 'Production', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed departments");

    sqlx::query(
        "INSERT INTO designations (id, name, created_at) VALUES
        ('10000000-0000-0000-0000-000000000001', 'Supervisor', datetime('now')),
        ('10000000-0000-0000-0000-000000000002', 'Fitter', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed designations");

    sqlx::query(
        "INSERT INTO buildings (id, name, plant_location, created_at) VALUES
        ('20000000-0000-0000-0000-000000000001', 'Main Block', 'PLANT-A', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed buildings");

    sqlx::query(
        "INSERT INTO areas (id, building_id, name, created_at) VALUES
        ('30000000-0000-0000-0000-000000000001', '20000000-0000-0000-0000-000000000001', 'Compressor Room', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed areas");

    sqlx::query(
        "INSERT INTO sub_areas (id, area_id, name, created_at) VALUES
        ('40000000-0000-0000-0000-000000000001', '30000000-0000-0000-0000-000000000001', 'Bay 1', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed sub areas");

    sqlx::query(
        "INSERT INTO issue_keywords (id, name, created_at) VALUES
        ('50000000-0000-0000-0000-000000000001', 'Leak', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed issue keywords");

    sqlx::query(
        "INSERT INTO hazard_keywords (id, name, created_at) VALUES
        ('50000000-0000-0000-0000-000000000002', 'Blocked exit', datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed hazard keywords");
}

pub async fn teardown_test_db(db: Database) {
    drop(db);
    // Test database files are cleaned up manually or by .gitignore
}
