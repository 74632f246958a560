//! Folio node binary
//!
//! Serves the academic portfolio content API.

use folio_site::{SiteConfig, SiteNode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_node=info,folio_site=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folio node");

    let config = SiteConfig::from_env()?;

    let node = SiteNode::new(config)?;
    node.run().await?;

    Ok(())
}
