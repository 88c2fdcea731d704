use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::contacts::handlers;
use crate::features::contacts::services::ContactService;

pub fn public_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .with_state(service)
}

/// Admin routes (mounted behind the auth middleware)
pub fn admin_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/admin/contacts", get(handlers::list_contacts))
        .route(
            "/api/admin/contacts/{id}/status",
            patch(handlers::update_contact_status),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MailConfig;
    use crate::modules::mailer::ResendClient;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn service() -> Arc<ContactService> {
        let mail = MailConfig {
            api_key: None,
            api_url: "https://api.resend.com".to_string(),
            from_address: "noreply@rs-gis.web.id".to_string(),
            admin_address: "admin@rs-gis.web.id".to_string(),
            site_url: "https://rs-gis.web.id".to_string(),
        };
        let mailer = Arc::new(ResendClient::new(&mail).unwrap());
        Arc::new(ContactService::new(lazy_pool(), mailer, mail))
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_fields() {
        let server = TestServer::new(public_routes(service())).unwrap();
        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": "Budi",
                "email": "budi@example.com",
                "subject": "  ",
                "message": "Halo"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Semua field wajib diisi");
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_field() {
        let server = TestServer::new(public_routes(service())).unwrap();
        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": "Budi",
                "email": "budi@example.com",
                "message": "Halo"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Semua field wajib diisi");
    }

    #[tokio::test]
    async fn test_admin_list_requires_auth() {
        let server = TestServer::new(admin_routes(service())).unwrap();
        server
            .get("/api/admin/contacts")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
