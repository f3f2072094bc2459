pub mod middleware;

pub mod access_rules;
pub mod auth;
pub mod employees;
pub mod facility;
pub mod locations;
pub mod org;
pub mod safety;

pub use middleware::*;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

// Base64-encoded 5 MiB images inflate by a third, so the body cap sits above
// the decoded image limit.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Build protected routes (require authentication)
    let protected = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::get_session))
        .route("/api/auth/permissions/:id", get(auth::get_permissions))
        .route("/api/auth/profile-image", post(auth::update_profile_image))
        // Employee administration
        .route("/api/admin/employees", get(employees::list_employees))
        .route("/api/admin/employees", post(employees::create_employee))
        .route("/api/admin/access", post(employees::replace_access))
        // Default-access rules
        .route("/api/admin/rules", get(access_rules::list_rules))
        .route("/api/admin/rules", post(access_rules::create_rules))
        .route("/api/admin/rules/:id", delete(access_rules::delete_rule))
        // Job master
        .route("/api/admin/job-master", get(org::get_job_master))
        .route("/api/admin/departments", post(org::add_department))
        .route(
            "/api/admin/departments/:id",
            delete(org::delete_department),
        )
        .route("/api/admin/designations", post(org::add_designation))
        .route(
            "/api/admin/designations/:id",
            delete(org::delete_designation),
        )
        // Shared location master data
        .route("/api/admin/buildings", post(locations::add_building))
        .route("/api/admin/buildings/:id", delete(locations::delete_building))
        .route("/api/admin/areas", post(locations::add_area))
        .route("/api/admin/areas/:id", delete(locations::delete_area))
        .route("/api/admin/sub-areas", post(locations::add_sub_area))
        .route(
            "/api/admin/sub-areas/:id",
            delete(locations::delete_sub_area),
        )
        // Facility maintenance module
        .route("/api/facility/tickets", get(facility::list_tickets))
        .route("/api/facility/tickets", post(facility::create_ticket))
        .route(
            "/api/facility/tickets/:id/assign",
            post(facility::assign_ticket),
        )
        .route(
            "/api/facility/tickets/:id/status",
            patch(facility::update_status),
        )
        .route("/api/facility/tickets/:id", delete(facility::delete_ticket))
        .route(
            "/api/facility/technicians",
            get(facility::list_technicians),
        )
        .route("/api/facility/master-data", get(facility::get_master_data))
        .route("/api/facility/keywords", post(facility::add_keyword))
        .route(
            "/api/facility/keywords/:id",
            delete(facility::delete_keyword),
        )
        // Safety module
        .route("/api/safety/tickets", get(safety::list_tickets))
        .route("/api/safety/tickets", post(safety::create_ticket))
        .route("/api/safety/tickets/:id/assign", post(safety::assign_ticket))
        .route(
            "/api/safety/tickets/:id/status",
            patch(safety::update_status),
        )
        .route("/api/safety/tickets/:id", delete(safety::delete_ticket))
        .route("/api/safety/technicians", get(safety::list_technicians))
        .route("/api/safety/master-data", get(safety::get_master_data))
        .route("/api/safety/keywords", post(safety::add_keyword))
        .route("/api/safety/keywords/:id", delete(safety::delete_keyword))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    // Build public routes
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", post(auth::verify))
        .route("/api/auth/activate", post(auth::activate))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Maintdesk Maintenance Ticketing System"
}

async fn health_handler() -> &'static str {
    "OK"
}
