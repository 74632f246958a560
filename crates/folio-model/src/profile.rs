//! Profile model - the portfolio owner.

use crate::error::{require, ValidationResult};
use serde::{Deserialize, Serialize};

/// The singleton academic profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Full name
    pub name: String,

    /// Job title, e.g. "Research Associate"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Department and institution
    pub affiliation: String,

    /// Short biography
    pub bio: String,

    pub email: String,
    pub phone: String,
    pub address: String,

    /// Research interests, in display order
    #[serde(default)]
    pub research_interests: Vec<String>,
}

impl Profile {
    /// Check write-side invariants.
    pub fn validate(&self) -> ValidationResult<()> {
        require("name", &self.name)
    }
}
