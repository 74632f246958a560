//! Contact-form intake.

use crate::error::{require, ValidationError, ValidationResult};
use chrono::{DateTime, SecondsFormat, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

/// A contact-form body as submitted by a visitor.
///
/// Absent fields decode as empty strings so that every missing or blank
/// field is reported by [`ContactSubmission::validate`] rather than by the
/// JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Check that all four fields are present and the email is well formed.
    pub fn validate(&self) -> ValidationResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)?;
        if !EmailAddress::is_valid(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Validate and stamp the submission, producing the record to persist.
    pub fn accept(self, received_at: DateTime<Utc>) -> ValidationResult<ContactMessage> {
        self.validate()?;
        let timestamp = received_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let id = crate::content_digest(&[
            &self.name,
            &self.email,
            &self.subject,
            &self.message,
            &timestamp,
        ]);
        Ok(ContactMessage {
            id,
            name: self.name,
            email: self.email.trim().to_string(),
            subject: self.subject,
            message: self.message,
            timestamp,
        })
    }
}

/// A validated contact message, as persisted by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Content-derived identifier (blake3 hex)
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,

    /// Acceptance time (RFC 3339, UTC)
    pub timestamp: String,
}

/// Acknowledgement returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAck {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ContactAck {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Thank you for your message. I'll get back to you soon!".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
