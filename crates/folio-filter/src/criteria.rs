//! Filter criteria - the search term and selector values as one value object.

use folio_model::{Publication, PublicationType};
use std::fmt;

/// Selector value meaning "no restriction on this dimension".
pub const ALL: &str = "all";

/// Year selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum YearFilter {
    /// No restriction
    #[default]
    All,
    /// Exact year
    Year(i32),
    /// Selector value that is not an integer; matches nothing
    Malformed(String),
}

impl YearFilter {
    /// Interpret a raw selector value.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            return Self::All;
        }
        match raw.parse::<i32>() {
            Ok(year) => Self::Year(year),
            Err(_) => Self::Malformed(raw.to_string()),
        }
    }

    pub fn matches(&self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Year(wanted) => *wanted == year,
            Self::Malformed(_) => false,
        }
    }
}

impl From<&str> for YearFilter {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Year(year) => write!(f, "{}", year),
            Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Publication type selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    /// No restriction
    #[default]
    All,
    /// Exact type
    Type(PublicationType),
    /// Selector value outside the four known types; matches nothing
    Unknown(String),
}

impl TypeFilter {
    /// Interpret a raw selector value. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            return Self::All;
        }
        match raw.parse::<PublicationType>() {
            Ok(kind) => Self::Type(kind),
            Err(_) => Self::Unknown(raw.to_string()),
        }
    }

    pub fn matches(&self, kind: PublicationType) -> bool {
        match self {
            Self::All => true,
            Self::Type(wanted) => *wanted == kind,
            Self::Unknown(_) => false,
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<PublicationType> for TypeFilter {
    fn from(kind: PublicationType) -> Self {
        Self::Type(kind)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Type(kind) => f.write_str(kind.as_str()),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Search term plus year and type selections.
///
/// The default value is the unfiltered state: empty search, `"all"`, `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub year: YearFilter,
    pub kind: TypeFilter,
}

impl FilterCriteria {
    /// Build criteria from raw selector values.
    pub fn new(search_term: impl Into<String>, year: &str, kind: &str) -> Self {
        Self {
            search_term: search_term.into(),
            year: YearFilter::parse(year),
            kind: TypeFilter::parse(kind),
        }
    }

    /// Builder: set the search term.
    pub fn with_search_term(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = search_term.into();
        self
    }

    /// Builder: set the year selection.
    pub fn with_year(mut self, year: impl Into<YearFilter>) -> Self {
        self.year = year.into();
        self
    }

    /// Builder: set the type selection.
    pub fn with_type(mut self, kind: impl Into<TypeFilter>) -> Self {
        self.kind = kind.into();
        self
    }

    /// True when no pass restricts anything.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.year == YearFilter::All && self.kind == TypeFilter::All
    }

    /// Whether a single publication passes all three predicates.
    pub fn matches(&self, publication: &Publication) -> bool {
        matches_search(publication, &self.search_term.to_lowercase())
            && self.year.matches(publication.year)
            && self.kind.matches(publication.kind)
    }
}

/// Case-insensitive substring test against title or authors.
/// `needle` must already be lowercase.
pub(crate) fn matches_search(publication: &Publication, needle: &str) -> bool {
    needle.is_empty()
        || publication.title.to_lowercase().contains(needle)
        || publication.authors.to_lowercase().contains(needle)
}
