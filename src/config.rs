use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub session_duration_hours: i64,
    pub admin_employee_no: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_location: String,
    pub default_employee_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://maintdesk.db?mode=rwc".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let session_duration_hours = env::var("SESSION_DURATION_HOURS")
            .unwrap_or_else(|_| "9".to_string())
            .parse()
            .unwrap_or(9);

        let admin_employee_no =
            env::var("ADMIN_EMPLOYEE_NO").map_err(|_| ConfigError::MissingAdminEmployeeNo)?;

        let admin_name =
            env::var("ADMIN_NAME").unwrap_or_else(|_| "System Administrator".to_string());

        let admin_email = env::var("ADMIN_EMAIL").map_err(|_| ConfigError::MissingAdminEmail)?;

        let admin_password =
            env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::MissingAdminPassword)?;

        let admin_location = env::var("ADMIN_LOCATION").unwrap_or_else(|_| "HQ".to_string());

        let default_employee_password =
            env::var("DEFAULT_EMPLOYEE_PASSWORD").unwrap_or_else(|_| "12345".to_string());

        Ok(Config {
            database_url,
            server_port,
            session_duration_hours,
            admin_employee_no,
            admin_name,
            admin_email,
            admin_password,
            admin_location,
            default_employee_password,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ADMIN_EMPLOYEE_NO environment variable not set")]
    MissingAdminEmployeeNo,

    #[error("ADMIN_EMAIL environment variable not set")]
    MissingAdminEmail,

    #[error("ADMIN_PASSWORD environment variable not set")]
    MissingAdminPassword,

    #[error("Invalid port number")]
    InvalidPort,
}
