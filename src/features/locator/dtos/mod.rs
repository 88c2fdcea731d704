mod locator_dto;

pub use locator_dto::{LocatorHospitalDto, LocatorOptionsDto, LocatorQuery, LocatorResponseDto};
