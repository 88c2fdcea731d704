use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, UpdateProfileDto};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::services::AuthService;
use crate::features::users::dtos::UserResponseDto;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use std::sync::Arc;
use validator::Validate;

fn set_cookie_header(cookie: String) -> Result<HeaderMap> {
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie value: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

/// Admin login; also sets the `adminToken` HttpOnly cookie
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Wrong password"),
        (status = 403, description = "Not an admin account")
    ),
    tag = "auth"
)]
pub async fn admin_login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(HeaderMap, Json<ApiResponse<LoginResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.admin_login(dto).await?;
    let headers = set_cookie_header(service.tokens().session_cookie(&response.token))?;

    Ok((
        headers,
        Json(ApiResponse::success(
            Some(response),
            Some("Login berhasil".to_string()),
            None,
        )),
    ))
}

/// Admin logout; clears the session cookie
#[utoipa::path(
    delete,
    path = "/api/admin/login",
    responses(
        (status = 200, description = "Logged out")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
) -> Result<(HeaderMap, Json<ApiResponse<()>>)> {
    let headers = set_cookie_header(service.tokens().clear_cookie())?;
    Ok((
        headers,
        Json(ApiResponse::success(
            None,
            Some("Logout berhasil".to_string()),
            None,
        )),
    ))
}

/// Login for any account
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login berhasil".to_string()),
        None,
    )))
}

/// Current admin profile
#[utoipa::path(
    get,
    path = "/api/admin/profile",
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Admin not found")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.profile(admin.user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the current admin profile
#[utoipa::path(
    put,
    path = "/api/admin/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_profile(admin.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profil berhasil diperbarui".to_string()),
        None,
    )))
}
