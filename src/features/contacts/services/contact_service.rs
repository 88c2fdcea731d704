use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::config::MailConfig;
use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactResponseDto, CreateContactDto};
use crate::features::contacts::models::{Contact, ContactStatus};
use crate::modules::mailer::{EmailSender, OutgoingEmail};
use crate::shared::templates::{
    render_contact_admin_email, render_contact_confirmation_email, ContactEmailContext,
};
use crate::shared::types::PaginationQuery;

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, status, created_at";
const CONFIRMATION_SUBJECT: &str = "Konfirmasi - Pesan Anda telah diterima";

/// Service for contact-form messages
pub struct ContactService {
    pool: PgPool,
    mailer: Arc<dyn EmailSender>,
    mail: MailConfig,
}

impl ContactService {
    pub fn new(pool: PgPool, mailer: Arc<dyn EmailSender>, mail: MailConfig) -> Self {
        Self { pool, mailer, mail }
    }

    /// Store the message as unread, then send both e-mails in the background
    pub async fn submit(&self, dto: CreateContactDto) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.subject)
        .bind(&dto.message)
        .bind(ContactStatus::Unread)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save contact message: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Contact message {} saved", contact.id);

        let mailer = Arc::clone(&self.mailer);
        let mail = self.mail.clone();
        let queued = contact.clone();
        tokio::spawn(async move {
            send_notifications(mailer.as_ref(), &mail, &queued).await;
        });

        Ok(contact)
    }

    /// List messages, newest first
    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ContactResponseDto>, i64)> {
        let contacts = self.fetch_recent(pagination.limit(), pagination.offset()).await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count contacts: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((contacts, total))
    }

    /// Latest `limit` messages
    pub async fn recent(&self, limit: i64) -> Result<Vec<ContactResponseDto>> {
        self.fetch_recent(limit, 0).await
    }

    async fn fetch_recent(&self, limit: i64, offset: i64) -> Result<Vec<ContactResponseDto>> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            CONTACT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list contacts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(contacts.into_iter().map(Into::into).collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<ContactResponseDto> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts SET status = $2 WHERE id = $1 RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update contact {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Pesan tidak ditemukan".to_string()))?;

        tracing::info!("Contact {} marked {:?}", id, status);
        Ok(contact.into())
    }
}

/// Build the admin notification and the sender confirmation
pub(crate) fn build_notifications(
    mail: &MailConfig,
    contact: &Contact,
) -> std::result::Result<[OutgoingEmail; 2], AppError> {
    let ctx = ContactEmailContext {
        contact_id: contact.id,
        name: &contact.name,
        email: &contact.email,
        subject: &contact.subject,
        message: &contact.message,
        site_url: &mail.site_url,
        sent_at: contact.created_at,
    };

    let admin_html = render_contact_admin_email(&ctx)
        .map_err(|e| AppError::Internal(format!("Failed to render admin e-mail: {}", e)))?;
    let confirmation_html = render_contact_confirmation_email(&ctx)
        .map_err(|e| AppError::Internal(format!("Failed to render confirmation e-mail: {}", e)))?;

    Ok([
        OutgoingEmail {
            from: mail.from_address.clone(),
            to: vec![mail.admin_address.clone()],
            subject: format!("[WebGIS RS] {} - dari {}", contact.subject, contact.name),
            html: admin_html,
        },
        OutgoingEmail {
            from: mail.from_address.clone(),
            to: vec![contact.email.clone()],
            subject: CONFIRMATION_SUBJECT.to_string(),
            html: confirmation_html,
        },
    ])
}

/// Send both e-mails; failures are logged and never surface to the submitter
pub(crate) async fn send_notifications(
    mailer: &dyn EmailSender,
    mail: &MailConfig,
    contact: &Contact,
) {
    let emails = match build_notifications(mail, contact) {
        Ok(emails) => emails,
        Err(e) => {
            tracing::error!("Contact {} notifications not sent: {}", contact.id, e);
            return;
        }
    };

    for email in emails {
        let subject = email.subject.clone();
        if let Err(e) = mailer.send(email).await {
            tracing::warn!(
                "Failed to send '{}' for contact {}: {}",
                subject,
                contact.id,
                e
            );
        }
    }
}
