use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::locator::dtos::{LocatorOptionsDto, LocatorQuery, LocatorResponseDto};
use crate::features::locator::services::LocatorService;
use crate::shared::types::{ApiResponse, Meta};

/// Filter, sort and map hospitals around the user
#[utoipa::path(
    get,
    path = "/api/locator",
    params(LocatorQuery),
    responses(
        (status = 200, description = "Filtered hospitals and map view", body = ApiResponse<LocatorResponseDto>),
        (status = 400, description = "Unknown distance band")
    ),
    tag = "locator"
)]
pub async fn locate(
    State(service): State<Arc<LocatorService>>,
    AppQuery(query): AppQuery<LocatorQuery>,
) -> Result<Json<ApiResponse<LocatorResponseDto>>> {
    let response = service.locate(query).await?;
    let total = response.hospitals.len() as i64;
    let message = response.warning.clone();

    Ok(Json(ApiResponse::success(
        Some(response),
        message,
        Some(Meta { total }),
    )))
}

/// Service checkboxes and distance bands for the filter form
#[utoipa::path(
    get,
    path = "/api/locator/options",
    responses(
        (status = 200, description = "Filter options", body = ApiResponse<LocatorOptionsDto>)
    ),
    tag = "locator"
)]
pub async fn options(
    State(service): State<Arc<LocatorService>>,
) -> Json<ApiResponse<LocatorOptionsDto>> {
    Json(ApiResponse::success(Some(service.options()), None, None))
}
