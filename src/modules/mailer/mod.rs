//! Outbound e-mail
//!
//! Provides the `EmailSender` seam and a client for the Resend HTTP API.

mod resend_client;

pub use resend_client::ResendClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::error::AppError;

/// A single HTML e-mail ready to be sent
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}
