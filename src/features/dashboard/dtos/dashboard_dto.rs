use serde::Serialize;
use utoipa::ToSchema;

use crate::features::contacts::dtos::ContactResponseDto;

/// Entity counts in one row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DashboardCounts {
    pub total_hospitals: i64,
    pub total_services: i64,
    pub total_users: i64,
    pub unread_contacts: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStatsDto {
    pub total_hospitals: i64,
    pub total_services: i64,
    pub total_users: i64,
    pub unread_contacts: i64,
    pub recent_contacts: Vec<ContactResponseDto>,
}

impl DashboardStatsDto {
    pub fn new(counts: DashboardCounts, recent_contacts: Vec<ContactResponseDto>) -> Self {
        Self {
            total_hospitals: counts.total_hospitals,
            total_services: counts.total_services,
            total_users: counts.total_users,
            unread_contacts: counts.unread_contacts,
            recent_contacts,
        }
    }
}
