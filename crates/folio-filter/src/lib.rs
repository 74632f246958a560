//! Folio Publication Filter Engine
//!
//! Narrows a publication collection by free-text search and structured
//! selections. Everything here is pure: no I/O, no shared state, and no
//! failure mode. Malformed selections simply match nothing.
//!
//! # Passes
//!
//! A publication is kept when all of these hold:
//!
//! 1. The search term is empty, or the title or authors contain it
//!    case-insensitively as a substring.
//! 2. The year selection is `"all"`, or the year equals its integer parse.
//! 3. The type selection is `"all"`, or the type's wire name equals it exactly.
//!
//! The passes are conjunctive, so their order never changes the result.
//! Input order is preserved.
//!
//! # Example
//!
//! ```
//! use folio_filter::{available_years, filter};
//! use folio_model::{Publication, PublicationType};
//!
//! let pubs = vec![
//!     Publication::new("Flame Dynamics", "A. Singh", 2022, PublicationType::Journal),
//!     Publication::new("Turbulence Models", "B. Rao", 2019, PublicationType::Conference),
//! ];
//!
//! assert_eq!(filter(&pubs, "flame", "all", "all")[0].title, "Flame Dynamics");
//! assert!(filter(&pubs, "", "2025", "all").is_empty());
//! assert_eq!(available_years(&pubs), vec![2022, 2019]);
//! ```

mod criteria;
mod engine;

pub use criteria::{FilterCriteria, TypeFilter, YearFilter, ALL};
pub use engine::{available_years, filter, filter_publications};
