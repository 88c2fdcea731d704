use crate::features::locator::geo::Coordinate;

/// Hospital as used by listings and the locator pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub region: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub operating_hours: Option<String>,
    pub coordinate: Coordinate,
    /// Service names in join order
    pub services: Vec<String>,
}

/// `hospitals` row joined with its ordered service names
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HospitalRow {
    pub code: String,
    pub name: String,
    pub address: String,
    pub region: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub operating_hours: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub services: Vec<String>,
}

impl From<HospitalRow> for Hospital {
    fn from(row: HospitalRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            description: row.description,
            address: row.address,
            region: row.region,
            phone: row.phone,
            email: row.email,
            website: row.website,
            operating_hours: row.operating_hours,
            coordinate: Coordinate::new(row.latitude, row.longitude),
            services: row.services,
        }
    }
}
