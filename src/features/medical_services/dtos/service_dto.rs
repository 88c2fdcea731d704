use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::medical_services::models::{
    CatalogEntry, HospitalServiceRow, MedicalService,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<MedicalService> for ServiceDto {
    fn from(s: MedicalService) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            icon: s.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogEntryDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub hospital_count: i64,
}

impl From<CatalogEntry> for CatalogEntryDto {
    fn from(e: CatalogEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            icon: e.icon,
            hospital_count: e.hospital_count,
        }
    }
}

/// A hospital with its service objects
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HospitalServicesDto {
    pub kode_rs: String,
    pub nama: String,
    pub layanan: Vec<ServiceDto>,
}

impl HospitalServicesDto {
    /// Group rows ordered by hospital into one entry per hospital
    pub fn group(rows: Vec<HospitalServiceRow>) -> Vec<Self> {
        let mut grouped: Vec<Self> = Vec::new();

        for row in rows {
            let service = match (row.service_id, row.service_name) {
                (Some(id), Some(name)) => Some(ServiceDto {
                    id,
                    name,
                    description: row.service_description.unwrap_or_default(),
                    icon: row.service_icon.unwrap_or_default(),
                }),
                _ => None,
            };

            match grouped.last_mut() {
                Some(last) if last.kode_rs == row.hospital_code => {
                    last.layanan.extend(service);
                }
                _ => grouped.push(Self {
                    kode_rs: row.hospital_code,
                    nama: row.hospital_name,
                    layanan: service.into_iter().collect(),
                }),
            }
        }

        grouped
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ByHospitalQuery {
    /// Restrict to one hospital
    pub hospital_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttachServiceDto {
    #[validate(length(min = 1, message = "Kode rumah sakit wajib diisi"))]
    pub hospital_code: String,

    #[validate(length(min = 1, max = 100, message = "Nama layanan wajib diisi"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceDto {
    #[validate(length(min = 1, message = "Kode rumah sakit wajib diisi"))]
    pub hospital_code: String,

    pub service_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Nama layanan wajib diisi"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DetachServiceDto {
    #[validate(length(min = 1, message = "Kode rumah sakit wajib diisi"))]
    pub hospital_code: String,

    pub service_id: Uuid,
}
