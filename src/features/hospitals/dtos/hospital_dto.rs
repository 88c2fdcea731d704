use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::hospitals::models::Hospital;
use crate::features::locator::geo::Coordinate;
use crate::shared::validation::{HOSPITAL_CODE_REGEX, PHONE_REGEX};

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value.and_then(non_empty)
}

/// Public listing record (`GET /api/hospitals`, bundled dataset entries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HospitalListingDto {
    #[serde(rename = "kode_rs")]
    pub code: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "deskripsi", default)]
    pub description: String,
    #[serde(rename = "lokasi")]
    pub location: LocationDto,
    #[serde(rename = "kontak")]
    pub contact: ContactInfoDto,
    #[serde(rename = "layanan", default)]
    pub services: Vec<String>,
    #[serde(rename = "koordinat")]
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "wilayah", default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactInfoDto {
    #[serde(rename = "telepon")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl From<Hospital> for HospitalListingDto {
    fn from(h: Hospital) -> Self {
        Self {
            code: h.code,
            name: h.name,
            description: h.description.unwrap_or_default(),
            location: LocationDto {
                address: h.address,
                region: h.region.unwrap_or_default(),
            },
            contact: ContactInfoDto {
                phone: h.phone,
                fax: None,
                email: h.email.unwrap_or_default(),
            },
            services: h.services,
            coordinate: h.coordinate,
        }
    }
}

impl From<HospitalListingDto> for Hospital {
    fn from(dto: HospitalListingDto) -> Self {
        Self {
            code: dto.code.trim().to_string(),
            name: dto.name,
            description: non_empty(dto.description),
            address: dto.location.address,
            region: non_empty(dto.location.region),
            phone: dto.contact.phone,
            email: non_empty(dto.contact.email),
            website: None,
            operating_hours: None,
            coordinate: dto.coordinate,
            services: dto.services,
        }
    }
}

/// Hospital detail (`GET /api/hospitals/{code}`)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HospitalDetailDto {
    #[serde(flatten)]
    pub listing: HospitalListingDto,
    pub website: Option<String>,
    #[serde(rename = "jam_operasional")]
    pub operating_hours: Option<String>,
}

impl From<Hospital> for HospitalDetailDto {
    fn from(h: Hospital) -> Self {
        let website = h.website.clone();
        let operating_hours = h.operating_hours.clone();
        Self {
            listing: h.into(),
            website,
            operating_hours,
        }
    }
}

/// Request DTO for creating a hospital (admin)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHospitalDto {
    #[validate(
        length(min = 1, max = 20, message = "Kode rumah sakit wajib diisi (maksimal 20 karakter)"),
        regex(path = *HOSPITAL_CODE_REGEX, message = "Kode rumah sakit hanya boleh huruf kapital, angka, dan tanda hubung (contoh: RS001)")
    )]
    pub code: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: HospitalFieldsDto,
}

/// Request DTO for updating a hospital (admin); `services`, when present, replaces the set
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateHospitalDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: HospitalFieldsDto,
}

/// Editable hospital attributes shared by create and update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct HospitalFieldsDto {
    #[validate(length(min = 1, max = 200, message = "Nama rumah sakit wajib diisi"))]
    pub name: String,

    #[validate(length(min = 1, max = 500, message = "Alamat wajib diisi"))]
    pub address: String,

    #[validate(length(max = 100))]
    pub region: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Nomor telepon tidak valid"))]
    pub phone: String,

    #[validate(email(message = "Format email tidak valid"))]
    pub email: Option<String>,

    #[validate(url(message = "Format website tidak valid"))]
    pub website: Option<String>,

    #[validate(length(max = 100))]
    pub operating_hours: Option<String>,

    #[validate(range(
        min = -7.4,
        max = -7.1,
        message = "Latitude harus berada di wilayah Surabaya (-7.4 s/d -7.1)"
    ))]
    pub latitude: f64,

    #[validate(range(
        min = 112.6,
        max = 112.8,
        message = "Longitude harus berada di wilayah Surabaya (112.6 s/d 112.8)"
    ))]
    pub longitude: f64,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub services: Option<Vec<String>>,
}

impl HospitalFieldsDto {
    pub fn into_hospital(self, code: String) -> Hospital {
        Hospital {
            code,
            name: self.name.trim().to_string(),
            description: trimmed_opt(self.description),
            address: self.address.trim().to_string(),
            region: trimmed_opt(self.region),
            phone: self.phone.trim().to_string(),
            email: trimmed_opt(self.email),
            website: trimmed_opt(self.website),
            operating_hours: trimmed_opt(self.operating_hours),
            coordinate: Coordinate::new(self.latitude, self.longitude),
            services: self.services.unwrap_or_default(),
        }
    }
}

/// Result of loading the bundled dataset into the database
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportSummaryDto {
    pub hospitals: usize,
    pub services_linked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> serde_json::Value {
        json!({
            "code": "RS001",
            "name": "RSUD Dr. Soetomo",
            "address": "Jl. Mayjen Prof. Dr. Moestopo No.6-8",
            "region": "Surabaya Timur",
            "phone": "(031) 5501078",
            "latitude": -7.268,
            "longitude": 112.758,
            "services": ["UGD 24 Jam", "ICU"]
        })
    }

    #[test]
    fn test_listing_wire_format() {
        let hospital = Hospital {
            code: "RS001".to_string(),
            name: "RSUD Dr. Soetomo".to_string(),
            description: None,
            address: "Jl. Moestopo".to_string(),
            region: Some("Surabaya Timur".to_string()),
            phone: "(031) 5501078".to_string(),
            email: None,
            website: Some("https://rsudrsoetomo.jatimprov.go.id".to_string()),
            operating_hours: None,
            coordinate: Coordinate::new(-7.27, 112.75),
            services: vec!["UGD 24 Jam".to_string()],
        };

        let value = serde_json::to_value(HospitalListingDto::from(hospital)).unwrap();
        assert_eq!(
            value,
            json!({
                "kode_rs": "RS001",
                "nama": "RSUD Dr. Soetomo",
                "deskripsi": "",
                "lokasi": { "alamat": "Jl. Moestopo", "wilayah": "Surabaya Timur" },
                "kontak": { "telepon": "(031) 5501078", "email": "" },
                "layanan": ["UGD 24 Jam"],
                "koordinat": { "lat": -7.27, "lng": 112.75 }
            })
        );
    }

    #[test]
    fn test_listing_to_hospital_drops_empty_optionals() {
        let dto: HospitalListingDto = serde_json::from_value(json!({
            "kode_rs": " RS002 ",
            "nama": "RS Darmo",
            "lokasi": { "alamat": "Jl. Raya Darmo 90", "wilayah": "" },
            "kontak": { "telepon": "(031) 5676253", "fax": "(031) 5676254", "email": "" },
            "layanan": [],
            "koordinat": { "lat": -7.28, "lng": 112.73 }
        }))
        .unwrap();

        let hospital = Hospital::from(dto);
        assert_eq!(hospital.code, "RS002");
        assert_eq!(hospital.region, None);
        assert_eq!(hospital.email, None);
        assert_eq!(hospital.description, None);
    }

    #[test]
    fn test_create_hospital_valid() {
        let dto: CreateHospitalDto = serde_json::from_value(fields()).unwrap();
        assert!(dto.validate().is_ok());

        let hospital = dto.fields.into_hospital(dto.code);
        assert_eq!(hospital.services, vec!["UGD 24 Jam", "ICU"]);
        assert_eq!(hospital.coordinate, Coordinate::new(-7.268, 112.758));
    }

    #[test]
    fn test_create_hospital_rejects_out_of_box_coordinates() {
        let mut value = fields();
        value["latitude"] = json!(-6.2);
        value["longitude"] = json!(106.8);
        let dto: CreateHospitalDto = serde_json::from_value(value).unwrap();

        let message = dto.validate().unwrap_err().to_string();
        assert!(message.contains("Latitude"));
        assert!(message.contains("Longitude"));
    }

    #[test]
    fn test_create_hospital_accepts_box_edges() {
        let mut value = fields();
        value["latitude"] = json!(-7.4);
        value["longitude"] = json!(112.8);
        let dto: CreateHospitalDto = serde_json::from_value(value).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_hospital_rejects_bad_code() {
        let mut value = fields();
        value["code"] = json!("rs 001");
        let dto: CreateHospitalDto = serde_json::from_value(value).unwrap();
        assert!(dto.validate().is_err());
    }
}
