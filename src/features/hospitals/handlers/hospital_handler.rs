use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::hospitals::dtos::{
    CreateHospitalDto, HospitalDetailDto, HospitalListingDto, ImportSummaryDto, UpdateHospitalDto,
};
use crate::features::hospitals::models::Hospital;
use crate::features::hospitals::services::HospitalService;
use crate::shared::types::{ApiResponse, Meta};

/// State for admin hospital handlers
#[derive(Clone)]
pub struct HospitalAdminState {
    pub service: Arc<HospitalService>,
    /// Static dataset used by the import endpoint
    pub baseline: Arc<Vec<Hospital>>,
}

/// List hospitals inside the Surabaya bounding box
#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "Hospitals retrieved", body = ApiResponse<Vec<HospitalListingDto>>)
    ),
    tag = "hospitals"
)]
pub async fn list_hospitals(
    State(service): State<Arc<HospitalService>>,
) -> Result<Json<ApiResponse<Vec<HospitalListingDto>>>> {
    let hospitals: Vec<HospitalListingDto> = service
        .list_visible()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = hospitals.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(hospitals),
        None,
        Some(Meta { total }),
    )))
}

/// Get hospital detail by code
#[utoipa::path(
    get,
    path = "/api/hospitals/{code}",
    params(("code" = String, Path, description = "Hospital code, e.g. RS001")),
    responses(
        (status = 200, description = "Hospital retrieved", body = ApiResponse<HospitalDetailDto>),
        (status = 404, description = "Hospital not found")
    ),
    tag = "hospitals"
)]
pub async fn get_hospital(
    State(service): State<Arc<HospitalService>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<HospitalDetailDto>>> {
    let hospital = service.get(&code).await?;
    Ok(Json(ApiResponse::success(Some(hospital.into()), None, None)))
}

/// Create a hospital (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/hospitals",
    request_body = CreateHospitalDto,
    responses(
        (status = 201, description = "Hospital created", body = ApiResponse<HospitalDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Hospital code already used")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn create_hospital(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<HospitalAdminState>,
    AppJson(dto): AppJson<CreateHospitalDto>,
) -> Result<(StatusCode, Json<ApiResponse<HospitalDetailDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let hospital = state.service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(hospital.into()),
            Some("Rumah sakit berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

/// Update a hospital (admin only)
#[utoipa::path(
    put,
    path = "/api/admin/hospitals/{code}",
    params(("code" = String, Path, description = "Hospital code")),
    request_body = UpdateHospitalDto,
    responses(
        (status = 200, description = "Hospital updated", body = ApiResponse<HospitalDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Hospital not found")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn update_hospital(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<HospitalAdminState>,
    Path(code): Path<String>,
    AppJson(dto): AppJson<UpdateHospitalDto>,
) -> Result<Json<ApiResponse<HospitalDetailDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let hospital = state.service.update(&code, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(hospital.into()),
        Some("Rumah sakit berhasil diperbarui".to_string()),
        None,
    )))
}

/// Delete a hospital and its service links (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/hospitals/{code}",
    params(("code" = String, Path, description = "Hospital code")),
    responses(
        (status = 200, description = "Hospital deleted"),
        (status = 404, description = "Hospital not found")
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn delete_hospital(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<HospitalAdminState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.service.delete(&code).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Rumah sakit berhasil dihapus".to_string()),
        None,
    )))
}

/// Upsert the static dataset into the database (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/hospitals/import",
    responses(
        (status = 200, description = "Dataset imported", body = ApiResponse<ImportSummaryDto>)
    ),
    tag = "hospitals",
    security(("bearer_auth" = []))
)]
pub async fn import_hospitals(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<HospitalAdminState>,
) -> Result<Json<ApiResponse<ImportSummaryDto>>> {
    let summary = state.service.import(&state.baseline).await?;
    Ok(Json(ApiResponse::success(
        Some(summary),
        Some("Data rumah sakit berhasil diimpor".to_string()),
        None,
    )))
}
