use uuid::Uuid;

/// A named service a hospital can offer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicalService {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Catalog row with the number of hospitals offering the service
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub hospital_count: i64,
}

/// One hospital/service pair; service columns are null for hospitals without services
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HospitalServiceRow {
    pub hospital_code: String,
    pub hospital_name: String,
    pub service_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub service_description: Option<String>,
    pub service_icon: Option<String>,
}
