//! Contact form relay.
//!
//! A submission moves linearly from received to exactly one terminal
//! outcome: service unavailable, invalid, delivered, provider error, or
//! unexpected error. Configuration and validation failures are detected
//! locally before any delivery attempt; provider failures are caught at
//! the edge of [`ContactService::submit`] and reduced to a generic
//! caller-facing message while the detail goes to the log. Nothing is
//! persisted, queued, or retried.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use crate::config::EmailConfig;
use crate::email::{render, DeliveryReceipt, EmailProvider, ProviderFailure};
use crate::models::contact::{ContactPayload, ContactReply, ContactSubmission};

/// Caller-facing message when no provider credential is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Email service is not configured. Please contact the site administrator.";
/// Caller-facing message for missing or empty fields.
pub const FIELDS_REQUIRED_MESSAGE: &str = "All fields are required";
/// Caller-facing message when the provider refuses the message.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";
/// Caller-facing message for any other failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Terminal failure outcomes of a contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// No provider credential is configured.
    Configuration,
    /// A required field is missing, empty, or not a string.
    Validation,
    /// The provider refused the message; carries the provider detail.
    Delivery(String),
    /// Anything else; carries the internal detail.
    Unexpected(String),
}

impl SubmissionError {
    /// HTTP status code for this outcome.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Configuration => 503,
            Self::Validation => 400,
            Self::Delivery(_) | Self::Unexpected(_) => 500,
        }
    }

    /// Message safe to show to the caller. Never includes internal detail.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Configuration => NOT_CONFIGURED_MESSAGE,
            Self::Validation => FIELDS_REQUIRED_MESSAGE,
            Self::Delivery(_) => SEND_FAILED_MESSAGE,
            Self::Unexpected(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Response body for this outcome.
    #[must_use]
    pub fn reply(&self) -> ContactReply {
        ContactReply::failed(self.public_message())
    }
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration: email credential not set"),
            Self::Validation => write!(f, "validation: required field missing"),
            Self::Delivery(msg) => write!(f, "delivery: {msg}"),
            Self::Unexpected(msg) => write!(f, "unexpected: {msg}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

impl From<ProviderFailure> for SubmissionError {
    fn from(failure: ProviderFailure) -> Self {
        match failure {
            rejected @ ProviderFailure::Rejected { .. } => Self::Delivery(rejected.to_string()),
            ProviderFailure::Transport(msg) => Self::Unexpected(msg),
        }
    }
}

/// Relays contact form submissions to the site owner.
#[derive(Clone)]
pub struct ContactService {
    config: EmailConfig,
    provider: Arc<dyn EmailProvider>,
}

impl ContactService {
    /// Build a service sending through `provider` with `config`'s
    /// addresses and credential.
    #[must_use]
    pub fn new(config: EmailConfig, provider: Arc<dyn EmailProvider>) -> Self {
        Self { config, provider }
    }

    /// Whether a provider credential is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Handle a raw JSON request body.
    ///
    /// The credential is checked before the body is even parsed, so a
    /// misconfigured deployment reports the same outcome for any input.
    /// Invalid JSON and a `null` body are unexpected failures. Any other
    /// non-object body has no fields and fails validation.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`SubmissionError`] outcome.
    pub async fn submit(&self, body: &[u8]) -> Result<DeliveryReceipt, SubmissionError> {
        let api_key = self.api_key()?;
        let payload: ContactPayload = serde_json::from_slice(body).map_err(|err| {
            error!(%err, "failed to parse contact form body");
            SubmissionError::Unexpected(format!("invalid request body: {err}"))
        })?;
        self.deliver(api_key, payload).await
    }

    /// Handle an already-decoded payload.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`SubmissionError`] outcome.
    pub async fn submit_payload(
        &self,
        payload: ContactPayload,
    ) -> Result<DeliveryReceipt, SubmissionError> {
        let api_key = self.api_key()?;
        self.deliver(api_key, payload).await
    }

    fn api_key(&self) -> Result<&str, SubmissionError> {
        self.config.api_key.as_deref().ok_or_else(|| {
            error!(
                env_key = %self.config.api_key_env,
                "contact form submitted but email service is not configured"
            );
            SubmissionError::Configuration
        })
    }

    async fn deliver(
        &self,
        api_key: &str,
        payload: ContactPayload,
    ) -> Result<DeliveryReceipt, SubmissionError> {
        let Some(submission) = payload.into_submission() else {
            warn!("contact form rejected: missing required field");
            return Err(SubmissionError::Validation);
        };

        let span = tracing::info_span!(
            "contact_submission",
            submission_id = %submission.id,
            received_at = %submission.received_at,
        );
        self.relay(api_key, &submission).instrument(span).await
    }

    async fn relay(
        &self,
        api_key: &str,
        submission: &ContactSubmission,
    ) -> Result<DeliveryReceipt, SubmissionError> {
        let email = render::contact_email(&self.config, submission);
        match self.provider.send(api_key, &email).await {
            Ok(receipt) => {
                info!(
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "contact email delivered"
                );
                Ok(receipt)
            }
            Err(failure) => {
                error!(%failure, "email provider error");
                Err(failure.into())
            }
        }
    }
}
