use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::medical_services::dtos::{
    AttachServiceDto, ByHospitalQuery, CatalogEntryDto, DetachServiceDto, HospitalServicesDto,
    ServiceDto, UpdateServiceDto,
};
use crate::features::medical_services::services::CatalogService;
use crate::shared::types::ApiResponse;

/// Service catalog with hospital counts
#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "Catalog retrieved", body = ApiResponse<Vec<CatalogEntryDto>>)
    ),
    tag = "services"
)]
pub async fn list_catalog(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<CatalogEntryDto>>>> {
    let catalog = service.catalog().await?;
    Ok(Json(ApiResponse::success(Some(catalog), None, None)))
}

/// Hospitals with their service objects
#[utoipa::path(
    get,
    path = "/api/services/by-hospital",
    params(ByHospitalQuery),
    responses(
        (status = 200, description = "Hospital services retrieved", body = ApiResponse<Vec<HospitalServicesDto>>)
    ),
    tag = "services"
)]
pub async fn list_by_hospital(
    State(service): State<Arc<CatalogService>>,
    AppQuery(query): AppQuery<ByHospitalQuery>,
) -> Result<Json<ApiResponse<Vec<HospitalServicesDto>>>> {
    let code = query
        .hospital_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let hospitals = service.by_hospital(code).await?;
    Ok(Json(ApiResponse::success(Some(hospitals), None, None)))
}

/// Attach a service to a hospital by name (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/services",
    request_body = AttachServiceDto,
    responses(
        (status = 201, description = "Service attached", body = ApiResponse<ServiceDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Hospital not found")
    ),
    tag = "services",
    security(("bearer_auth" = []))
)]
pub async fn attach_service(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    AppJson(dto): AppJson<AttachServiceDto>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let attached = service.attach(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(attached),
            Some("Layanan berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

/// Update a service attached to a hospital (admin only)
#[utoipa::path(
    put,
    path = "/api/admin/services",
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<ServiceDto>),
        (status = 404, description = "Service not attached to hospital"),
        (status = 409, description = "Service name already used")
    ),
    tag = "services",
    security(("bearer_auth" = []))
)]
pub async fn update_service(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    AppJson(dto): AppJson<UpdateServiceDto>,
) -> Result<Json<ApiResponse<ServiceDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = service.update(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("Layanan berhasil diperbarui".to_string()),
        None,
    )))
}

/// Detach a service from a hospital (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/services",
    request_body = DetachServiceDto,
    responses(
        (status = 200, description = "Service detached"),
        (status = 404, description = "Service not attached to hospital")
    ),
    tag = "services",
    security(("bearer_auth" = []))
)]
pub async fn detach_service(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    AppJson(dto): AppJson<DetachServiceDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.detach(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Layanan dihapus".to_string()),
        None,
    )))
}
