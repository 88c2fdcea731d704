use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::contacts::dtos::{
    ContactCreatedDto, ContactResponseDto, CreateContactDto, UpdateContactStatusDto,
    REQUIRED_FIELDS_MESSAGE,
};
use crate::features::contacts::services::ContactService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<ContactCreatedDto>),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "contacts"
)]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactCreatedDto>>)> {
    let dto = dto.trimmed();
    if dto.has_blank_field() {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let contact = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ContactCreatedDto {
                contact_id: contact.id,
            }),
            Some("Pesan berhasil dikirim! Kami akan segera merespons.".to_string()),
            None,
        )),
    ))
}

/// List contact messages, newest first (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/contacts",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Messages retrieved", body = ApiResponse<Vec<ContactResponseDto>>)
    ),
    tag = "contacts",
    security(("bearer_auth" = []))
)]
pub async fn list_contacts(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ContactService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ContactResponseDto>>>> {
    let (contacts, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(contacts),
        None,
        Some(Meta { total }),
    )))
}

/// Mark a message read or unread (admin only)
#[utoipa::path(
    patch,
    path = "/api/admin/contacts/{id}/status",
    params(("id" = Uuid, Path, description = "Contact message id")),
    request_body = UpdateContactStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ContactResponseDto>),
        (status = 404, description = "Message not found")
    ),
    tag = "contacts",
    security(("bearer_auth" = []))
)]
pub async fn update_contact_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateContactStatusDto>,
) -> Result<Json<ApiResponse<ContactResponseDto>>> {
    let contact = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(contact),
        Some("Status pesan diperbarui".to_string()),
        None,
    )))
}
