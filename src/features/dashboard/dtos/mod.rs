mod dashboard_dto;

pub use dashboard_dto::{DashboardCounts, DashboardStatsDto};
