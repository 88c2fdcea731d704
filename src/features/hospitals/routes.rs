use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::hospitals::handlers::{self, HospitalAdminState};
use crate::features::hospitals::models::Hospital;
use crate::features::hospitals::services::HospitalService;

pub fn public_routes(service: Arc<HospitalService>) -> Router {
    Router::new()
        .route("/api/hospitals", get(handlers::list_hospitals))
        .route("/api/hospitals/{code}", get(handlers::get_hospital))
        .with_state(service)
}

/// Admin routes (mounted behind the auth middleware)
pub fn admin_routes(service: Arc<HospitalService>, baseline: Arc<Vec<Hospital>>) -> Router {
    let state = HospitalAdminState { service, baseline };

    Router::new()
        .route("/api/admin/hospitals", post(handlers::create_hospital))
        .route(
            "/api/admin/hospitals/import",
            post(handlers::import_hospitals),
        )
        .route(
            "/api/admin/hospitals/{code}",
            put(handlers::update_hospital).delete(handlers::delete_hospital),
        )
        .with_state(state)
}
