//! Folio Content Model
//!
//! Data types served by the Folio content API and consumed by the portfolio
//! client.
//!
//! # Core Types
//!
//! - [`Profile`] - The singleton academic profile
//! - [`Publication`] - A journal article, conference paper, book chapter or
//!   submitted manuscript, discriminated by [`PublicationType`]
//! - [`News`] - A dated news item
//!
//! # Contact Intake
//!
//! - [`ContactSubmission`] - Raw contact-form body as it arrives on the wire
//! - [`ContactMessage`] - A validated, timestamped message ready to persist
//! - [`ContactAck`] - Acknowledgement returned to the submitter
//!
//! All write-side checks report a [`ValidationError`].

mod contact;
mod error;
mod news;
mod profile;
mod publication;

pub use contact::{ContactAck, ContactMessage, ContactSubmission};
pub use error::{ValidationError, ValidationResult};
pub use news::{sort_news_for_display, News};
pub use profile::Profile;
pub use publication::{sort_publications_for_display, Publication, PublicationType};

/// Hex-encoded blake3 digest over `parts`, separated by NUL bytes.
///
/// Used for content-derived record keys so that re-seeding the same record
/// overwrites instead of duplicating it.
pub(crate) fn content_digest(parts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(&[0]);
    }
    hex::encode(hasher.finalize().as_bytes())
}
