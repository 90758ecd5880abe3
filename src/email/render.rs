//! Composition of the owner notification sent for a contact submission.

use crate::config::EmailConfig;
use crate::models::contact::ContactSubmission;

use super::OutboundEmail;

/// Line break marker substituted for each newline in the message.
pub const LINE_BREAK: &str = "<br>";

/// Build the owner notification for `submission`.
///
/// Sender and recipient come from configuration; replies go to the
/// submitter. Submitter fields are HTML-escaped unless
/// `config.escape_html` is off.
#[must_use]
pub fn contact_email(config: &EmailConfig, submission: &ContactSubmission) -> OutboundEmail {
    let field = |value: &str| {
        if config.escape_html {
            escape_html(value)
        } else {
            value.to_owned()
        }
    };

    let name = field(&submission.name);
    let email = field(&submission.email);
    let message = newlines_to_breaks(&field(&submission.message));

    let html = format!(
        "\n<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>\n"
    );

    OutboundEmail {
        from: config.from.clone(),
        to: vec![config.to.clone()],
        reply_to: submission.email.clone(),
        subject: subject_for(&submission.name),
        html,
    }
}

/// Subject line naming the submitter.
#[must_use]
pub fn subject_for(name: &str) -> String {
    format!("New Contact Form Message from {name}")
}

/// Replace each `\r\n` or `\n` with [`LINE_BREAK`].
#[must_use]
pub fn newlines_to_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', LINE_BREAK)
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
