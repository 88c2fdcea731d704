use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto, UpdateProfileDto};
use crate::features::auth::password;
use crate::features::auth::services::TokenService;
use crate::features::users::dtos::{UpdateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::features::users::UserService;

/// Login and profile operations on top of the user store
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Admin panel login. Non-admin accounts are refused before the password is checked.
    pub async fn admin_login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = match self.users.find_by_email(&dto.email).await? {
            Some(user) if user.is_admin() => user,
            _ => {
                tracing::info!("Admin login refused for {}", dto.email);
                return Err(AppError::Forbidden("Akses ditolak!".to_string()));
            }
        };

        if !password::verify_password(dto.password, user.password_hash.clone()).await? {
            return Err(AppError::Unauthorized("Kata sandi salah".to_string()));
        }

        tracing::info!("Admin {} logged in", user.id);
        self.issue(user)
    }

    /// Login for any account role
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Pengguna tidak ditemukan".to_string()))?;

        if !password::verify_password(dto.password, user.password_hash.clone()).await? {
            return Err(AppError::Unauthorized("Password salah".to_string()));
        }

        self.issue(user)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserResponseDto> {
        self.find_admin(user_id).await.map(Into::into)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<UserResponseDto> {
        let admin = self.find_admin(user_id).await?;

        self.users
            .update(
                admin.id,
                UpdateUserDto {
                    name: dto.name,
                    email: dto.email,
                    password: dto.password,
                    role: None,
                },
            )
            .await
    }

    async fn find_admin(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(User::is_admin)
            .ok_or_else(|| AppError::NotFound("Admin tidak ditemukan".to_string()))
    }

    fn issue(&self, user: User) -> Result<LoginResponseDto> {
        let issued = self.tokens.issue(&user)?;
        Ok(LoginResponseDto {
            token: issued.token,
            expires_in: issued.expires_in,
            user: user.into(),
        })
    }
}
