mod hospital_dto;

pub use hospital_dto::{
    ContactInfoDto, CreateHospitalDto, HospitalDetailDto, HospitalFieldsDto, HospitalListingDto,
    ImportSummaryDto, LocationDto, UpdateHospitalDto,
};
