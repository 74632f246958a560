//! Folio Site - Academic Portfolio Content Node
//!
//! Serves an academic portfolio's profile, publications and news over a small
//! JSON API, and accepts contact-form messages.
//!
//! # Architecture
//!
//! - **Storage**: RocksDB-backed content store
//! - **API**: HTTP endpoints under `/api` (read-only content, contact intake, CV download)
//! - **Admin Socket**: Unix socket for local seeding commands (folio-admin CLI)
//!
//! # Example
//!
//! ```no_run
//! use folio_site::{SiteConfig, SiteNode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SiteConfig::from_env()?;
//!     let node = SiteNode::new(config)?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod admin_socket;
pub mod api;
pub mod error;
pub mod node;
pub mod storage;

pub use error::{Error, Result};
pub use node::{CvArtifact, SiteConfig, SiteNode, SiteState};
pub use storage::{SeedBundle, Storage};
