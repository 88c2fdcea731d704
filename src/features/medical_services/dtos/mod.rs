mod service_dto;

pub use service_dto::{
    AttachServiceDto, ByHospitalQuery, CatalogEntryDto, DetachServiceDto, HospitalServicesDto,
    ServiceDto, UpdateServiceDto,
};
