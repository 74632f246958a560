//! News model.

use crate::error::{require, ValidationError, ValidationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub title: String,
    pub content: String,

    /// ISO-8601 calendar date (`YYYY-MM-DD`)
    pub date: String,

    /// Optional grouping, e.g. "award" or "talk"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl News {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            date: date.into(),
            category: None,
        }
    }

    /// Builder: set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Parsed calendar date.
    pub fn parsed_date(&self) -> ValidationResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))
    }

    /// Storage key component. Leads with the date so keys iterate chronologically.
    pub fn record_id(&self) -> String {
        format!("{}:{}", self.date, crate::content_digest(&[&self.title, &self.content]))
    }

    /// Check write-side invariants.
    pub fn validate(&self) -> ValidationResult<()> {
        require("title", &self.title)?;
        require("content", &self.content)?;
        self.parsed_date().map(|_| ())
    }
}

/// Sort newest first, for display.
pub fn sort_news_for_display(news: &mut [News]) {
    // ISO dates order lexicographically
    news.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
}
