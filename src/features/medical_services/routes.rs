use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::medical_services::handlers;
use crate::features::medical_services::services::CatalogService;

pub fn public_routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/services", get(handlers::list_catalog))
        .route("/api/services/by-hospital", get(handlers::list_by_hospital))
        .with_state(service)
}

/// Admin routes (mounted behind the auth middleware)
pub fn admin_routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/api/admin/services",
            axum::routing::post(handlers::attach_service)
                .put(handlers::update_service)
                .delete(handlers::detach_service),
        )
        .with_state(service)
}
