use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::password;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::shared::types::PaginationQuery;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";
const EMAIL_TAKEN: &str = "Email sudah terdaftar";

/// Service for user account management
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List users, newest first
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        let total = self.count().await?;

        Ok((users.into_iter().map(Into::into).collect(), total))
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<UserResponseDto> {
        self.find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Pengguna tidak ditemukan".to_string()))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let email = dto.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = password::hash_password(dto.password).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(dto.name.trim())
        .bind(&email)
        .bind(password_hash)
        .bind(dto.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::from_db(e, EMAIL_TAKEN)
        })?;

        tracing::info!("User {} created with role {:?}", user.id, user.role);
        Ok(user.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pengguna tidak ditemukan".to_string()))?;

        let email = dto.email.trim().to_lowercase();
        if let Some(other) = self.find_by_email(&email).await? {
            if other.id != id {
                return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }

        let password_hash = match dto.password {
            Some(password) => Some(password::hash_password(password).await?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                role = $4,
                password_hash = COALESCE($5, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(dto.name.trim())
        .bind(&email)
        .bind(dto.role.unwrap_or(existing.role))
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user {}: {:?}", id, e);
            AppError::from_db(e, EMAIL_TAKEN)
        })?;

        Ok(user.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pengguna tidak ditemukan".to_string()));
        }

        tracing::info!("User {} deleted", id);
        Ok(())
    }
}
