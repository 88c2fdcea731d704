mod medical_service;

pub use medical_service::{CatalogEntry, HospitalServiceRow, MedicalService};
