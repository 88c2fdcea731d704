mod contact_dto;

pub use contact_dto::{
    ContactCreatedDto, ContactResponseDto, CreateContactDto, UpdateContactStatusDto,
    REQUIRED_FIELDS_MESSAGE,
};
