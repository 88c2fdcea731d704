//! Resend HTTP API client
//!
//! Sends e-mail with `POST {api_url}/emails` using bearer authentication.
//! Without an API key the client runs disabled and only logs what it would send.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{EmailSender, OutgoingEmail};
use crate::core::config::MailConfig;
use crate::core::error::AppError;

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

pub struct ResendClient {
    api_key: Option<String>,
    api_url: String,
    http_client: Client,
}

impl ResendClient {
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!("RESEND_API_KEY not set, outgoing e-mail is disabled");
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_url)
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let Some(api_key) = &self.api_key else {
            debug!(
                "Mail disabled, skipping '{}' to {:?}",
                email.subject, email.to
            );
            return Ok(());
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to reach mail API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Mail API error: HTTP {} - {}",
                status, body
            )));
        }

        let sent: SendEmailResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse mail API response: {}", e))
        })?;

        info!("E-mail '{}' sent, id={}", email.subject, sent.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> MailConfig {
        MailConfig {
            api_key: api_key.map(str::to_string),
            api_url: "https://api.resend.com/".to_string(),
            from_address: "noreply@rs-gis.web.id".to_string(),
            admin_address: "admin@rs-gis.web.id".to_string(),
            site_url: "https://rs-gis.web.id".to_string(),
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = ResendClient::new(&config(Some("re_test"))).unwrap();
        assert_eq!(client.endpoint(), "https://api.resend.com/emails");
        assert!(client.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_client_skips_send() {
        let client = ResendClient::new(&config(None)).unwrap();
        assert!(!client.is_enabled());

        let result = client
            .send(OutgoingEmail {
                from: "noreply@rs-gis.web.id".to_string(),
                to: vec!["someone@example.com".to_string()],
                subject: "Tes".to_string(),
                html: "<p>tes</p>".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }
}
