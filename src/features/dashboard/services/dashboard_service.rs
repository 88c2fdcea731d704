use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::contacts::ContactService;
use crate::features::dashboard::dtos::{DashboardCounts, DashboardStatsDto};
use crate::shared::constants::DASHBOARD_RECENT_CONTACTS;

/// Service for admin dashboard statistics
pub struct DashboardService {
    pool: PgPool,
    contacts: Arc<ContactService>,
}

impl DashboardService {
    pub fn new(pool: PgPool, contacts: Arc<ContactService>) -> Self {
        Self { pool, contacts }
    }

    pub async fn stats(&self) -> Result<DashboardStatsDto> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM hospitals) AS total_hospitals,
                (SELECT COUNT(*) FROM services) AS total_services,
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM contacts WHERE status = 'UNREAD') AS unread_contacts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard counts: {:?}", e);
            AppError::Database(e)
        })?;

        let recent = self.contacts.recent(DASHBOARD_RECENT_CONTACTS).await?;

        Ok(DashboardStatsDto::new(counts, recent))
    }
}
