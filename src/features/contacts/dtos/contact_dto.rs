use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::contacts::models::{Contact, ContactStatus};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Semua field wajib diisi";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Semua field wajib diisi"))]
    pub name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Semua field wajib diisi"),
        email(message = "Format email tidak valid")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Semua field wajib diisi"))]
    pub subject: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Semua field wajib diisi"))]
    pub message: String,
}

impl CreateContactDto {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Whitespace-only fields count as missing
    pub fn has_blank_field(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|f| f.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactCreatedDto {
    pub contact_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponseDto {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            subject: c.subject,
            message: c.message,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactStatusDto {
    pub status: ContactStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn dto() -> CreateContactDto {
        CreateContactDto {
            name: Name().fake(),
            email: SafeEmail().fake(),
            subject: Sentence(1..4).fake(),
            message: Sentence(3..10).fake(),
        }
    }

    #[test]
    fn test_valid_contact() {
        let dto = dto();
        assert!(dto.validate().is_ok());
        assert!(!dto.has_blank_field());
    }

    #[test]
    fn test_missing_field_message() {
        let mut dto = dto();
        dto.subject = String::new();
        let err = dto.validate().unwrap_err().to_string();
        assert!(err.contains(REQUIRED_FIELDS_MESSAGE));
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut dto = dto();
        dto.message = "   \n".to_string();
        assert!(dto.has_blank_field());
    }

    #[test]
    fn test_missing_json_field_counts_as_blank() {
        let dto: CreateContactDto =
            serde_json::from_str(r#"{"name":"Budi","email":"budi@example.com","message":"Halo"}"#)
                .unwrap();
        assert!(dto.subject.is_empty());
        assert!(dto.has_blank_field());
    }

    #[test]
    fn test_padded_email_validates_after_trim() {
        let mut dto = dto();
        dto.email = "  budi@example.com \n".to_string();
        assert!(dto.clone().validate().is_err());

        let dto = dto.trimmed();
        assert_eq!(dto.email, "budi@example.com");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut dto = dto();
        dto.email = "bukan-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let dto: UpdateContactStatusDto = serde_json::from_str(r#"{"status":"READ"}"#).unwrap();
        assert_eq!(dto.status, ContactStatus::Read);
    }
}
