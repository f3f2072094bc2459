pub mod access;
pub mod auth;
pub mod employee_service;
pub mod grant_service;
pub mod location_service;
pub mod org_service;
pub mod rule_service;
pub mod ticket_service;
pub mod validators;

pub use auth::*;
pub use validators::*;
