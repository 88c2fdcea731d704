use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{User, UserRole};
use crate::shared::validation::blank_as_none;

/// Request DTO for creating a user from the admin panel
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "Nama wajib diisi (maksimal 100 karakter)"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password minimal 6 karakter"))]
    pub password: String,

    #[serde(default)]
    pub role: UserRole,
}

/// Request DTO for updating a user; the password is only changed when supplied
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "Nama wajib diisi (maksimal 100 karakter)"))]
    pub name: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 6, max = 128, message = "Password minimal 6 karakter"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_defaults_to_user_role() {
        let dto: CreateUserDto = serde_json::from_value(serde_json::json!({
            "name": "Siti",
            "email": "siti@example.com",
            "password": "rahasia123"
        }))
        .unwrap();

        assert_eq!(dto.role, UserRole::User);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_user_rejects_short_password_and_bad_email() {
        let dto = CreateUserDto {
            name: "Siti".to_string(),
            email: "bukan-email".to_string(),
            password: "123".to_string(),
            role: UserRole::Admin,
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_update_user_password_optional() {
        let dto: UpdateUserDto = serde_json::from_value(serde_json::json!({
            "name": "Siti",
            "email": "siti@example.com",
            "role": "ADMIN"
        }))
        .unwrap();

        assert!(dto.password.is_none());
        assert_eq!(dto.role, Some(UserRole::Admin));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_user_blank_password_is_unchanged() {
        let dto: UpdateUserDto = serde_json::from_value(serde_json::json!({
            "name": "Siti",
            "email": "siti@example.com",
            "password": "",
            "role": "USER"
        }))
        .unwrap();

        assert!(dto.password.is_none());
        assert!(dto.validate().is_ok());
    }
}
