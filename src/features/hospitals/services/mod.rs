mod hospital_service;

pub(crate) use hospital_service::upsert_service;
pub use hospital_service::HospitalService;
