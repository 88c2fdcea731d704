use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::dtos::UserResponseDto;
use crate::shared::validation::blank_as_none;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Email dan password wajib diisi"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub user: UserResponseDto,
}

/// Profile update for the signed-in admin; password is only changed when supplied
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Nama wajib diisi (maksimal 100 karakter)"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 6, max = 128, message = "Password minimal 6 karakter"))]
    pub password: Option<String>,
}
