use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/api/admin/login",
            post(handlers::admin_login).delete(handlers::logout),
        )
        .route("/api/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require a session token)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/api/admin/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .with_state(service)
}
