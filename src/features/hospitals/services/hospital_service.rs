use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashSet;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::hospitals::dtos::{CreateHospitalDto, ImportSummaryDto, UpdateHospitalDto};
use crate::features::hospitals::models::{Hospital, HospitalRow};
use crate::features::locator::feed::HospitalSource;
use crate::shared::constants::DEFAULT_SERVICE_ICON;

const HOSPITAL_SELECT: &str = r#"
    SELECT h.code, h.name, h.address, h.region, h.phone, h.email, h.website,
           h.operating_hours, h.latitude, h.longitude, h.description,
           COALESCE(
               ARRAY_AGG(s.name ORDER BY hs.position, s.name) FILTER (WHERE s.id IS NOT NULL),
               '{}'::TEXT[]
           ) AS services
    FROM hospitals h
    LEFT JOIN hospital_services hs ON hs.hospital_code = h.code
    LEFT JOIN services s ON s.id = hs.service_id
"#;

const HOSPITAL_NOT_FOUND: &str = "Rumah Sakit tidak ditemukan";
const CODE_TAKEN: &str = "Kode rumah sakit sudah digunakan";

/// Service for hospital records and their service links
pub struct HospitalService {
    pool: PgPool,
}

impl HospitalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All stored hospitals, including ones outside the bounding box
    pub async fn list_all(&self) -> Result<Vec<Hospital>> {
        let rows = sqlx::query_as::<_, HospitalRow>(&format!(
            "{} GROUP BY h.code ORDER BY h.code",
            HOSPITAL_SELECT
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list hospitals: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Hospitals shown publicly (inside the bounding box)
    pub async fn list_visible(&self) -> Result<Vec<Hospital>> {
        let hospitals = self.list_all().await?;
        Ok(hospitals
            .into_iter()
            .filter(|h| h.coordinate.in_bounds())
            .collect())
    }

    pub async fn find(&self, code: &str) -> Result<Option<Hospital>> {
        let row = sqlx::query_as::<_, HospitalRow>(&format!(
            "{} WHERE h.code = $1 GROUP BY h.code",
            HOSPITAL_SELECT
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get hospital {}: {:?}", code, e);
            AppError::Database(e)
        })?;

        Ok(row.map(Into::into))
    }

    /// Public detail; out-of-box records are reported as missing
    pub async fn get(&self, code: &str) -> Result<Hospital> {
        self.find(code)
            .await?
            .filter(|h| h.coordinate.in_bounds())
            .ok_or_else(|| AppError::NotFound(HOSPITAL_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, dto: CreateHospitalDto) -> Result<Hospital> {
        let code = dto.code.trim().to_string();
        let hospital = dto.fields.into_hospital(code.clone());

        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO hospitals (code, name, address, region, phone, email, website,
                                   operating_hours, latitude, longitude, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&hospital.code)
        .bind(&hospital.name)
        .bind(&hospital.address)
        .bind(&hospital.region)
        .bind(&hospital.phone)
        .bind(&hospital.email)
        .bind(&hospital.website)
        .bind(&hospital.operating_hours)
        .bind(hospital.coordinate.lat)
        .bind(hospital.coordinate.lng)
        .bind(&hospital.description)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create hospital {}: {:?}", code, e);
            AppError::from_db(e, CODE_TAKEN)
        })?;

        attach_services(&mut tx, &code, &hospital.services).await?;
        commit(tx).await?;

        tracing::info!("Hospital {} created", code);
        self.require(&code).await
    }

    /// Update a hospital; the service list is replaced only when supplied
    pub async fn update(&self, code: &str, dto: UpdateHospitalDto) -> Result<Hospital> {
        let replace_services = dto.fields.services.is_some();
        let hospital = dto.fields.into_hospital(code.to_string());

        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE hospitals
            SET name = $2, address = $3, region = $4, phone = $5, email = $6, website = $7,
                operating_hours = $8, latitude = $9, longitude = $10, description = $11,
                updated_at = NOW()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .bind(&hospital.name)
        .bind(&hospital.address)
        .bind(&hospital.region)
        .bind(&hospital.phone)
        .bind(&hospital.email)
        .bind(&hospital.website)
        .bind(&hospital.operating_hours)
        .bind(hospital.coordinate.lat)
        .bind(hospital.coordinate.lng)
        .bind(&hospital.description)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update hospital {}: {:?}", code, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(HOSPITAL_NOT_FOUND.to_string()));
        }

        if replace_services {
            detach_all(&mut tx, code).await?;
            attach_services(&mut tx, code, &hospital.services).await?;
        }

        commit(tx).await?;

        tracing::info!("Hospital {} updated", code);
        self.require(code).await
    }

    pub async fn delete(&self, code: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM hospitals WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete hospital {}: {:?}", code, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(HOSPITAL_NOT_FOUND.to_string()));
        }

        tracing::info!("Hospital {} deleted", code);
        Ok(())
    }

    /// Upsert hospitals and replace their service links in one transaction
    pub async fn import(&self, hospitals: &[Hospital]) -> Result<ImportSummaryDto> {
        let mut tx = self.begin().await?;
        let mut services_linked = 0;

        for hospital in hospitals {
            sqlx::query(
                r#"
                INSERT INTO hospitals (code, name, address, region, phone, email, website,
                                       operating_hours, latitude, longitude, description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (code) DO UPDATE SET
                    name = EXCLUDED.name,
                    address = EXCLUDED.address,
                    region = EXCLUDED.region,
                    phone = EXCLUDED.phone,
                    email = EXCLUDED.email,
                    website = COALESCE(EXCLUDED.website, hospitals.website),
                    operating_hours = COALESCE(EXCLUDED.operating_hours, hospitals.operating_hours),
                    latitude = EXCLUDED.latitude,
                    longitude = EXCLUDED.longitude,
                    description = EXCLUDED.description,
                    updated_at = NOW()
                "#,
            )
            .bind(&hospital.code)
            .bind(&hospital.name)
            .bind(&hospital.address)
            .bind(&hospital.region)
            .bind(&hospital.phone)
            .bind(&hospital.email)
            .bind(&hospital.website)
            .bind(&hospital.operating_hours)
            .bind(hospital.coordinate.lat)
            .bind(hospital.coordinate.lng)
            .bind(&hospital.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to import hospital {}: {:?}", hospital.code, e);
                AppError::Database(e)
            })?;

            detach_all(&mut tx, &hospital.code).await?;
            services_linked += attach_services(&mut tx, &hospital.code, &hospital.services).await?;
        }

        commit(tx).await?;

        tracing::info!(
            "Imported {} hospitals ({} service links)",
            hospitals.len(),
            services_linked
        );

        Ok(ImportSummaryDto {
            hospitals: hospitals.len(),
            services_linked,
        })
    }

    async fn require(&self, code: &str) -> Result<Hospital> {
        self.find(code)
            .await?
            .ok_or_else(|| AppError::NotFound(HOSPITAL_NOT_FOUND.to_string()))
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })
    }
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<()> {
    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit transaction: {:?}", e);
        AppError::Database(e)
    })
}

async fn detach_all(tx: &mut Transaction<'_, Postgres>, code: &str) -> Result<()> {
    sqlx::query("DELETE FROM hospital_services WHERE hospital_code = $1")
        .bind(code)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to clear services of {}: {:?}", code, e);
            AppError::Database(e)
        })?;
    Ok(())
}

/// Find-or-create each named service and link it in list order.
/// Blank and repeated names are skipped. Returns the number of links made.
async fn attach_services(
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    names: &[String],
) -> Result<usize> {
    let mut seen = HashSet::new();
    let mut linked = 0;

    let names = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty() && seen.insert(n.to_lowercase()));

    for (position, name) in names.enumerate() {
        let service_id = upsert_service(tx, name, name, DEFAULT_SERVICE_ICON).await?;

        sqlx::query(
            r#"
            INSERT INTO hospital_services (hospital_code, service_id, position)
            VALUES ($1, $2, $3)
            ON CONFLICT (hospital_code, service_id) DO NOTHING
            "#,
        )
        .bind(code)
        .bind(service_id)
        .bind(position as i32)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to link service {} to {}: {:?}", name, code, e);
            AppError::from_db(e, "Layanan sudah terdaftar")
        })?;

        linked += 1;
    }

    Ok(linked)
}

/// Id of the service called `name`, creating it when missing
pub(crate) async fn upsert_service(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    description: &str,
    icon: &str,
) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO services (id, name, description, icon)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(name)
    .bind(description)
    .bind(icon)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert service {}: {:?}", name, e);
        AppError::Database(e)
    })
}

#[async_trait]
impl HospitalSource for HospitalService {
    async fn fetch_all(&self) -> Result<Vec<Hospital>> {
        self.list_all().await
    }
}
