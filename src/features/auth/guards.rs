//! Role-based authorization guards.
//!
//! Routes behind `auth_middleware` carry an `AuthenticatedUser` in the request
//! extensions; these guards check its role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Token tidak ditemukan".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Akses ditolak!".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
