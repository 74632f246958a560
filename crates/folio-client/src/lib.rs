//! Folio Client
//!
//! The consuming side of the content API, as an explicit pipeline:
//!
//! - [`ContentClient`] - capability to fetch profile, publications, news and
//!   the CV, and to submit contact messages
//! - [`HttpContentClient`] - reqwest implementation against a configured API base
//! - [`PortfolioState`] - holds fetched content plus the current
//!   [`FilterCriteria`](folio_filter::FilterCriteria), and reruns the filter
//!   engine whenever the publications or the criteria change
//!
//! # Example
//!
//! ```no_run
//! use folio_client::{HttpContentClient, PortfolioState};
//!
//! # async fn demo() -> folio_client::Result<()> {
//! let client = HttpContentClient::from_env()?;
//! let mut state = PortfolioState::load(&client).await?;
//! state.set_search_term("flame");
//! state.set_year_filter("2022");
//! for publication in state.visible() {
//!     println!("{} ({})", publication.title, publication.year);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod state;

pub use client::{ContentClient, CvDocument, HttpContentClient, DEFAULT_API_BASE};
pub use error::{ClientError, Result};
pub use state::PortfolioState;
