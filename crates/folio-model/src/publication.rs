//! Publication model - journal articles, conference papers, book chapters.

use crate::error::{require, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of publication. Exactly these four values are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationType {
    Journal,
    Conference,
    BookChapter,
    Submitted,
}

impl PublicationType {
    /// Every publication type, in selector order.
    pub const ALL: [PublicationType; 4] = [
        PublicationType::Journal,
        PublicationType::Conference,
        PublicationType::BookChapter,
        PublicationType::Submitted,
    ];

    /// Wire name, as used in JSON and in type filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::BookChapter => "book_chapter",
            Self::Submitted => "submitted",
        }
    }

    /// Human label for a type selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Journal => "Journal Articles",
            Self::Conference => "Conference Papers",
            Self::BookChapter => "Book Chapters",
            Self::Submitted => "Under Review",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationType {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPublicationType(s.to_string()))
    }
}

/// A publication listed on the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Title
    pub title: String,

    /// Freeform author list ("Lastname, F. et al.")
    pub authors: String,

    /// Publication year (4-digit)
    pub year: i32,

    /// Publication type
    #[serde(rename = "type")]
    pub kind: PublicationType,

    /// Journal or venue name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,

    /// External link (DOI, publisher page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Editorial status, e.g. "Under review"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Publication {
    /// Create a publication with required fields.
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        year: i32,
        kind: PublicationType,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            year,
            kind,
            journal: None,
            link: None,
            status: None,
        }
    }

    /// Builder: set the journal/venue.
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Builder: set the external link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Builder: set the editorial status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Storage key component, derived from title, authors and year.
    pub fn record_id(&self) -> String {
        crate::content_digest(&[&self.title, &self.authors, &self.year.to_string()])
    }

    /// Check write-side invariants.
    pub fn validate(&self) -> ValidationResult<()> {
        require("title", &self.title)?;
        require("authors", &self.authors)?;
        if !(1000..=9999).contains(&self.year) {
            return Err(ValidationError::InvalidYear(self.year));
        }
        Ok(())
    }
}

/// Sort by year descending, then by title, for display.
pub fn sort_publications_for_display(publications: &mut [Publication]) {
    publications.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.title.cmp(&b.title)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_wire_names() {
        for kind in PublicationType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<PublicationType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_type_rejected() {
        assert_eq!(
            "Journal".parse::<PublicationType>(),
            Err(ValidationError::UnknownPublicationType("Journal".into()))
        );
        let json = r#"{"title":"T","authors":"A","year":2020,"type":"thesis"}"#;
        assert!(serde_json::from_str::<Publication>(json).is_err());
    }

    #[test]
    fn optional_fields_omitted_on_wire() {
        let publication =
            Publication::new("Flame Dynamics", "A. Singh", 2022, PublicationType::Journal);
        let value = serde_json::to_value(&publication).unwrap();
        assert_eq!(value["type"], "journal");
        assert!(value.get("journal").is_none());
        assert!(value.get("link").is_none());

        let linked = publication.with_link("https://doi.org/10.1000/x");
        let value = serde_json::to_value(&linked).unwrap();
        assert_eq!(value["link"], "https://doi.org/10.1000/x");
    }

    #[test]
    fn validate_year_range() {
        let mut publication = Publication::new("T", "A", 999, PublicationType::Conference);
        assert_eq!(publication.validate(), Err(ValidationError::InvalidYear(999)));
        publication.year = 2019;
        assert!(publication.validate().is_ok());
    }

    #[test]
    fn validate_required_text() {
        let publication = Publication::new("  ", "A", 2020, PublicationType::Journal);
        assert_eq!(publication.validate(), Err(ValidationError::MissingField("title")));
    }

    #[test]
    fn record_id_stable_per_content() {
        let a = Publication::new("T", "A", 2020, PublicationType::Journal);
        let b = a.clone().with_journal("J. Fluid Mech.");
        let c = Publication::new("T", "A", 2021, PublicationType::Journal);
        assert_eq!(a.record_id(), b.record_id());
        assert_ne!(a.record_id(), c.record_id());
    }

    #[test]
    fn display_order() {
        let mut publications = vec![
            Publication::new("B", "x", 2019, PublicationType::Journal),
            Publication::new("Z", "x", 2022, PublicationType::Journal),
            Publication::new("A", "x", 2019, PublicationType::Journal),
        ];
        sort_publications_for_display(&mut publications);
        let titles: Vec<_> = publications.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Z", "A", "B"]);
    }
}
