use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::hospitals::services::upsert_service;
use crate::features::medical_services::dtos::{
    AttachServiceDto, CatalogEntryDto, DetachServiceDto, HospitalServicesDto, ServiceDto,
    UpdateServiceDto,
};
use crate::features::medical_services::models::{CatalogEntry, HospitalServiceRow, MedicalService};

const RELATION_NOT_FOUND: &str = "Layanan tidak ditemukan untuk rumah sakit ini";

/// Service catalog and hospital/service links
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All services with the number of hospitals offering each
    pub async fn catalog(&self) -> Result<Vec<CatalogEntryDto>> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT s.id, s.name, s.description, s.icon,
                   COUNT(hs.hospital_code) AS hospital_count
            FROM services s
            LEFT JOIN hospital_services hs ON hs.service_id = s.id
            GROUP BY s.id
            ORDER BY s.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list service catalog: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Hospitals with their services; an unknown code yields an empty list
    pub async fn by_hospital(&self, code: Option<&str>) -> Result<Vec<HospitalServicesDto>> {
        let rows = sqlx::query_as::<_, HospitalServiceRow>(
            r#"
            SELECT h.code AS hospital_code, h.name AS hospital_name,
                   s.id AS service_id, s.name AS service_name,
                   s.description AS service_description, s.icon AS service_icon
            FROM hospitals h
            LEFT JOIN hospital_services hs ON hs.hospital_code = h.code
            LEFT JOIN services s ON s.id = hs.service_id
            WHERE $1::TEXT IS NULL OR h.code = $1
            ORDER BY h.code, hs.position, s.name
            "#,
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list hospital services: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(HospitalServicesDto::group(rows))
    }

    /// Link a service to a hospital by name, creating the service if needed
    pub async fn attach(&self, dto: AttachServiceDto) -> Result<ServiceDto> {
        let code = dto.hospital_code.trim();
        let name = dto.name.trim();

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let hospital_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM hospitals WHERE code = $1)")
                .bind(code)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check hospital {}: {:?}", code, e);
                    AppError::Database(e)
                })?;

        if !hospital_exists {
            return Err(AppError::NotFound("Rumah Sakit tidak ditemukan".to_string()));
        }

        let service_id = upsert_service(
            &mut tx,
            name,
            dto.description.as_deref().unwrap_or_default(),
            dto.icon.as_deref().unwrap_or_default(),
        )
        .await?;

        sqlx::query(
            r#"
            INSERT INTO hospital_services (hospital_code, service_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
            FROM hospital_services WHERE hospital_code = $1
            ON CONFLICT (hospital_code, service_id) DO NOTHING
            "#,
        )
        .bind(code)
        .bind(service_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to link service {} to {}: {:?}", service_id, code, e);
            AppError::Database(e)
        })?;

        let service = sqlx::query_as::<_, MedicalService>(
            "SELECT id, name, description, icon FROM services WHERE id = $1",
        )
        .bind(service_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load service {}: {:?}", service_id, e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit service link: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Service '{}' attached to hospital {}", service.name, code);
        Ok(service.into())
    }

    /// Edit a service that is attached to the given hospital
    pub async fn update(&self, dto: UpdateServiceDto) -> Result<ServiceDto> {
        self.require_relation(&dto.hospital_code, dto.service_id)
            .await?;

        let service = sqlx::query_as::<_, MedicalService>(
            r#"
            UPDATE services
            SET name = $2,
                description = COALESCE($3, description),
                icon = COALESCE($4, icon)
            WHERE id = $1
            RETURNING id, name, description, icon
            "#,
        )
        .bind(dto.service_id)
        .bind(dto.name.trim())
        .bind(dto.description)
        .bind(dto.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update service {}: {:?}", dto.service_id, e);
            AppError::from_db(e, "Nama layanan sudah digunakan")
        })?;

        tracing::info!("Service {} updated", service.id);
        Ok(service.into())
    }

    /// Remove the link between a hospital and a service
    pub async fn detach(&self, dto: DetachServiceDto) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM hospital_services WHERE hospital_code = $1 AND service_id = $2",
        )
        .bind(dto.hospital_code.trim())
        .bind(dto.service_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to detach service {}: {:?}", dto.service_id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(RELATION_NOT_FOUND.to_string()));
        }

        tracing::info!(
            "Service {} detached from hospital {}",
            dto.service_id,
            dto.hospital_code
        );
        Ok(())
    }

    async fn require_relation(&self, code: &str, service_id: uuid::Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM hospital_services WHERE hospital_code = $1 AND service_id = $2
            )
            "#,
        )
        .bind(code.trim())
        .bind(service_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check service relation: {:?}", e);
            AppError::Database(e)
        })?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(RELATION_NOT_FOUND.to_string()))
        }
    }
}
