//! Content node - configuration and the main application entry point.
//!
//! Architecture:
//! - Single daemon process with shared RocksDB storage
//! - HTTP API for the portfolio client (profile, publications, news, contact, CV)
//! - Unix admin socket for local seeding (folio-admin CLI)

use crate::admin_socket::AdminSocket;
use crate::api;
use crate::error::{Error, Result};
use crate::storage::Storage;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The downloadable CV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvArtifact {
    /// File on disk
    pub path: PathBuf,

    /// File name offered to the browser
    pub download_name: String,
}

impl CvArtifact {
    /// Use the file's own name as the download name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let download_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv.pdf".to_string());
        Self { path, download_name }
    }

    pub fn with_download_name(mut self, name: impl Into<String>) -> Self {
        self.download_name = name.into();
        self
    }

    /// MIME type from the file extension, PDF when unknown.
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| "application/pdf".to_string())
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.download_name.replace('"', ""))
    }
}

/// Configuration for a content node.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Data directory for storage
    pub data_dir: PathBuf,

    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Admin socket path (for folio-admin CLI)
    pub admin_socket: PathBuf,

    /// CV served by `GET /api/cv`
    pub cv: Option<CvArtifact>,
}

impl SiteConfig {
    /// Defaults rooted at `data_dir`, without a CV.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            admin_socket: data_dir.join("admin.sock"),
            data_dir,
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cv: None,
        }
    }

    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup (environment, test maps).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = PathBuf::from(
            lookup("FOLIO_DATA_DIR").unwrap_or_else(|| "./folio-data".to_string()),
        );
        let mut config = Self::with_data_dir(&data_dir);

        if let Some(addr) = lookup("FOLIO_API_ADDR") {
            config.api_addr = addr
                .parse()
                .map_err(|e| Error::Config(format!("Invalid FOLIO_API_ADDR {:?}: {}", addr, e)))?;
        }

        if let Some(socket) = lookup("FOLIO_ADMIN_SOCKET") {
            config.admin_socket = PathBuf::from(socket);
        }

        config.cv = lookup("FOLIO_CV_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(|path| {
                let cv = CvArtifact::new(path);
                match lookup("FOLIO_CV_FILENAME").filter(|n| !n.trim().is_empty()) {
                    Some(name) => cv.with_download_name(name),
                    None => cv,
                }
            });

        Ok(config)
    }
}

/// Shared state for the content node - single storage instance shared by all components.
///
/// Immutable after startup, so handlers share it without locking.
pub struct SiteState {
    pub storage: Arc<Storage>,
    pub config: SiteConfig,
}

impl SiteState {
    pub fn new(storage: Arc<Storage>, config: SiteConfig) -> Self {
        Self { storage, config }
    }
}

/// A content node instance.
pub struct SiteNode {
    state: Arc<SiteState>,
}

impl SiteNode {
    /// Create a new content node, opening storage under the data directory.
    pub fn new(config: SiteConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let storage = Arc::new(Storage::open(config.data_dir.join("content"))?);

        if storage.get_profile()?.is_none() {
            tracing::warn!("No profile seeded yet; GET /api/profile will return 404");
        }
        if let Some(cv) = &config.cv {
            if !Path::new(&cv.path).exists() {
                tracing::warn!("CV file {:?} does not exist; GET /api/cv will return 404", cv.path);
            }
        }

        let state = Arc::new(SiteState::new(storage, config));
        Ok(Self { state })
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<SiteState> {
        Arc::clone(&self.state)
    }

    /// Get shared storage.
    pub fn storage(&self) -> Arc<Storage> {
        Arc::clone(&self.state.storage)
    }

    /// Run the node (starts admin socket and HTTP server).
    pub async fn run(self) -> Result<()> {
        let config = &self.state.config;
        tracing::info!("Folio node starting");
        tracing::info!("  API: http://{}", config.api_addr);
        tracing::info!("  Admin: {:?}", config.admin_socket);
        tracing::info!("  Data: {:?}", config.data_dir);
        match &config.cv {
            Some(cv) => tracing::info!("  CV: {:?}", cv.path),
            None => tracing::info!("  CV: not configured"),
        }

        let admin_socket = AdminSocket::new(self.storage(), &config.admin_socket);
        tokio::spawn(async move {
            if let Err(e) = admin_socket.run().await {
                tracing::error!("Admin socket error: {}", e);
            }
        });

        let app = api::build_router(self.state());

        let listener = tokio::net::TcpListener::bind(config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", config.api_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
