//! Outbound email abstraction.
//!
//! The [`EmailProvider`] trait decouples the contact flow from the
//! transactional email service so the flow can be exercised against an
//! in-process provider in tests.

pub mod render;
pub mod resend;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

pub use resend::ResendClient;

/// A fully composed message ready for delivery.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Fixed service sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Submitter address for replies.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier, when one is returned.
    pub message_id: Option<String>,
}

/// Ways a single delivery attempt can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The provider answered and refused the message.
    Rejected {
        /// HTTP status reported by the provider.
        status: u16,
        /// Provider error detail.
        message: String,
    },
    /// The call itself failed: network, timeout, or undecodable response.
    Transport(String),
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected { status, message } => write!(f, "rejected ({status}): {message}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
        }
    }
}

impl std::error::Error for ProviderFailure {}

/// Boxed future returned by [`EmailProvider::send`].
pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<DeliveryReceipt, ProviderFailure>> + Send + 'a>>;

/// Transactional email delivery service.
///
/// Implementations must be [`Send`] and [`Sync`] to allow sharing across
/// request handlers via [`std::sync::Arc`]. Exactly one attempt is made
/// per call; implementations do not retry.
pub trait EmailProvider: Send + Sync {
    /// Deliver `email` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderFailure::Rejected`] when the provider refuses the
    /// message and [`ProviderFailure::Transport`] when the call fails.
    fn send<'a>(&'a self, api_key: &'a str, email: &'a OutboundEmail) -> SendFuture<'a>;
}
