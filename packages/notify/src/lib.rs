#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transactional email delivery.
//!
//! Sends estimate deliveries, customer autoresponders, and sales lead
//! notifications through a Resend-compatible HTTP API. Delivery is
//! fire-and-once: no automatic retry, a failed send surfaces to the
//! caller for an explicit user retry.
//!
//! Configuration comes from the environment:
//! - `RESEND_API_KEY`: API key; the mailer is disabled when unset.
//! - `RESEND_FROM`: sender address (defaults to [`DEFAULT_FROM`]).

use serde::Serialize;
use thiserror::Error;

/// Default Resend-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Default sender address when `RESEND_FROM` is unset.
pub const DEFAULT_FROM: &str = "estimates@roof-quote.example.com";

/// Errors from email delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the message.
    #[error("Email API error ({status}): {message}")]
    Api {
        /// HTTP status code returned.
        status: u16,
        /// Response body text.
        message: String,
    },
}

/// A file attached to an outgoing email (e.g. the client-rendered
/// estimate PDF). Content is base64 as produced by the client and
/// passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Attachment filename shown to the recipient.
    pub filename: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// An outgoing email message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// Optional HTML body.
    pub html: Option<String>,
    /// File attachments.
    pub attachments: Vec<Attachment>,
}

/// JSON payload for the Resend `POST /emails` endpoint.
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    attachments: &'a [Attachment],
}

/// Resend-compatible email client.
pub struct Mailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl Mailer {
    /// Creates a mailer against a specific API endpoint.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }

    /// Builds a mailer from the environment, or `None` when no API key
    /// is configured (email delivery disabled).
    #[must_use]
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let Ok(api_key) = std::env::var("RESEND_API_KEY") else {
            log::warn!("RESEND_API_KEY not set; email delivery is disabled");
            return None;
        };
        let from =
            std::env::var("RESEND_FROM").unwrap_or_else(|_| DEFAULT_FROM.to_string());
        Some(Self::new(client, DEFAULT_BASE_URL, api_key, from))
    }

    /// The configured sender address.
    #[must_use]
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Sends one email message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the request fails, or
    /// [`NotifyError::Api`] when the API answers with a non-success
    /// status. Never retries.
    pub async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let payload = SendPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
            attachments: &message.attachments,
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            log::info!(
                "notify: sent '{}' to {} recipient(s)",
                message.subject,
                message.to.len()
            );
            Ok(())
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            to: vec!["pat@example.com".to_string()],
            subject: "Your roof estimate".to_string(),
            text: "Estimate attached.".to_string(),
            html: None,
            attachments: vec![Attachment {
                filename: "estimate.pdf".to_string(),
                content: "JVBERi0=".to_string(),
            }],
        }
    }

    #[test]
    fn payload_serializes_required_fields() {
        let m = message();
        let payload = SendPayload {
            from: "estimates@example.com",
            to: &m.to,
            subject: &m.subject,
            text: &m.text,
            html: m.html.as_deref(),
            attachments: &m.attachments,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from"], "estimates@example.com");
        assert_eq!(json["to"][0], "pat@example.com");
        assert_eq!(json["attachments"][0]["filename"], "estimate.pdf");
        // No HTML body was set, so the key is omitted entirely.
        assert!(json.get("html").is_none());
    }

    #[test]
    fn payload_omits_empty_attachments() {
        let mut m = message();
        m.attachments.clear();
        let payload = SendPayload {
            from: "estimates@example.com",
            to: &m.to,
            subject: &m.subject,
            text: &m.text,
            html: m.html.as_deref(),
            attachments: &m.attachments,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("attachments").is_none());
    }
}
