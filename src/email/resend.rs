//! HTTP client for the Resend transactional email API.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{DeliveryReceipt, EmailProvider, OutboundEmail, ProviderFailure, SendFuture};
use crate::{AppError, Result};

/// Successful `POST /emails` response.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

/// Error body returned by the provider on a refused message.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    name: Option<String>,
}

/// Resend API client sharing one connection pool across requests.
#[derive(Debug, Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ResendClient {
    /// Build a client for `base_url` whose calls give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Email` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Email(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL messages are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(
        &self,
        api_key: &str,
        email: &OutboundEmail,
    ) -> std::result::Result<DeliveryReceipt, ProviderFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(|err| ProviderFailure::Transport(err.to_string()))?;

        let status = response.status();
        debug!(%status, "email provider responded");

        if status.is_success() {
            let body: SendResponse = response
                .json()
                .await
                .map_err(|err| ProviderFailure::Transport(format!("bad response body: {err}")))?;
            return Ok(DeliveryReceipt {
                message_id: body.id,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|err| ProviderFailure::Transport(err.to_string()))?;
        Err(ProviderFailure::Rejected {
            status: status.as_u16(),
            message: rejection_message(&text, status.canonical_reason()),
        })
    }
}

impl EmailProvider for ResendClient {
    fn send<'a>(&'a self, api_key: &'a str, email: &'a OutboundEmail) -> SendFuture<'a> {
        Box::pin(self.post(api_key, email))
    }
}

/// Pull a readable detail out of a provider error body.
fn rejection_message(body: &str, reason: Option<&str>) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            message: Some(message),
            name: Some(name),
        }) => format!("{name}: {message}"),
        Ok(ErrorResponse {
            message: Some(message),
            name: None,
        }) => message,
        _ if !body.trim().is_empty() => body.trim().to_owned(),
        _ => reason.unwrap_or("unknown provider error").to_owned(),
    }
}
