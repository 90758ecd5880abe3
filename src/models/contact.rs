//! Contact form submission models.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Confirmation message returned after a successful relay.
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// Raw contact form body as received from the client.
///
/// Fields are kept as loose JSON values so that a missing key, `null`,
/// an empty string, and a non-string value can all be reported as the
/// same validation failure. Only a JSON object carries members: any other
/// non-null body decodes to an empty payload, and `null` is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPayload {
    /// Submitter's name.
    pub name: Option<Value>,
    /// Submitter's address, used as the reply-to.
    pub email: Option<Value>,
    /// Free-text message body.
    pub message: Option<Value>,
}

impl<'de> Deserialize<'de> for ContactPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        Self::from_json(body).ok_or_else(|| de::Error::custom("contact form body is null"))
    }
}

impl ContactPayload {
    /// Build a payload from three plain strings.
    #[must_use]
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: Some(Value::String(name.to_owned())),
            email: Some(Value::String(email.to_owned())),
            message: Some(Value::String(message.to_owned())),
        }
    }

    /// Read the form members out of a decoded JSON body.
    ///
    /// Arrays, strings, numbers, and booleans have no named members and
    /// yield an empty payload. Returns `None` for `null`.
    #[must_use]
    pub fn from_json(body: Value) -> Option<Self> {
        match body {
            Value::Null => None,
            Value::Object(mut members) => Some(Self {
                name: members.remove("name"),
                email: members.remove("email"),
                message: members.remove("message"),
            }),
            _ => Some(Self::default()),
        }
    }

    /// Convert into a validated submission.
    ///
    /// Returns `None` when any field is missing, `null`, empty, or not a
    /// string.
    #[must_use]
    pub fn into_submission(self) -> Option<ContactSubmission> {
        let name = required_text(self.name)?;
        let email = required_text(self.email)?;
        let message = required_text(self.message)?;
        Some(ContactSubmission::new(name, email, message))
    }
}

fn required_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    }
}

/// A validated, request-scoped contact form submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Correlation identifier used in log records.
    pub id: Uuid,
    /// Submitter's name.
    pub name: String,
    /// Submitter's address.
    pub email: String,
    /// Message text as submitted.
    pub message: String,
    /// When the request was accepted for validation.
    pub received_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Construct a submission stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            received_at: Utc::now(),
        }
    }
}

/// JSON body returned by the contact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ContactReply {
    /// `{ "success": true, "message": "..." }`
    Sent {
        /// Always `true`.
        success: bool,
        /// Confirmation text.
        message: String,
    },
    /// `{ "error": "..." }`
    Failed {
        /// Caller-facing error message.
        error: String,
    },
}

impl ContactReply {
    /// The success body.
    #[must_use]
    pub fn sent() -> Self {
        Self::Sent {
            success: true,
            message: SENT_MESSAGE.into(),
        }
    }

    /// An error body carrying a caller-facing message.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}
