use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Admin dashboard routes (mounted behind the auth middleware)
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/admin/dashboard/stats", get(handlers::get_stats))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MailConfig;
    use crate::features::contacts::ContactService;
    use crate::modules::mailer::ResendClient;
    use crate::shared::test_helpers::{lazy_pool, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn router() -> Router {
        let mail = MailConfig {
            api_key: None,
            api_url: "https://api.resend.com".to_string(),
            from_address: "noreply@rs-gis.web.id".to_string(),
            admin_address: "admin@rs-gis.web.id".to_string(),
            site_url: "https://rs-gis.web.id".to_string(),
        };
        let contacts = Arc::new(ContactService::new(
            lazy_pool(),
            Arc::new(ResendClient::new(&mail).unwrap()),
            mail,
        ));
        routes(Arc::new(DashboardService::new(lazy_pool(), contacts)))
    }

    #[tokio::test]
    async fn test_stats_requires_auth() {
        TestServer::new(router())
            .unwrap()
            .get("/api/admin/dashboard/stats")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_stats_requires_admin_role() {
        TestServer::new(with_user_auth(router()))
            .unwrap()
            .get("/api/admin/dashboard/stats")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
