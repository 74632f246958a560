//! Unix socket server for admin commands.
//!
//! Provides a local IPC interface for seeding the profile, publications and
//! news. Content has no write endpoints on the HTTP API; this socket is the
//! only way in.

use crate::error::Result;
use crate::storage::{SeedBundle, Storage};
use folio_model::{News, Profile, Publication};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Admin command sent over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AdminCommand {
    /// Replace the profile
    SetProfile { profile: Profile },
    /// Store one publication
    AddPublication { publication: Publication },
    /// Store one news item
    AddNews { news: News },
    /// Load a bundle atomically
    Seed { bundle: SeedBundle },
    /// Count stored contact messages
    CountMessages,
    /// Ping (health check)
    Ping,
}

/// Response from admin command.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    Count { value: usize },
    Pong,
}

/// Admin socket server.
pub struct AdminSocket {
    storage: Arc<Storage>,
    socket_path: PathBuf,
}

impl AdminSocket {
    /// Create a new admin socket server.
    pub fn new(storage: Arc<Storage>, socket_path: impl AsRef<Path>) -> Self {
        Self {
            storage,
            socket_path: socket_path.as_ref().to_path_buf(),
        }
    }

    /// Run the admin socket server.
    pub async fn run(&self) -> Result<()> {
        // Remove a stale socket file left by a previous run
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("Admin socket listening on {:?}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let storage = Arc::clone(&self.storage);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, storage).await {
                            tracing::error!("Admin connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept admin connection: {}", e);
                }
            }
        }
    }

    /// Get the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

async fn handle_connection(stream: UnixStream, storage: Arc<Storage>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    while reader.read_line(&mut line).await? > 0 {
        let response = match serde_json::from_str::<AdminCommand>(&line) {
            Ok(cmd) => execute_command(cmd, &storage),
            Err(e) => AdminResponse::Error {
                error: format!("Invalid command: {}", e),
            },
        };

        let response_json = serde_json::to_string(&response)? + "\n";
        writer.write_all(response_json.as_bytes()).await?;
        line.clear();
    }

    Ok(())
}

fn ok_or_error(result: Result<()>, message: String) -> AdminResponse {
    match result {
        Ok(()) => {
            tracing::info!("{}", message);
            AdminResponse::Ok { message }
        }
        Err(e) => {
            tracing::warn!("Admin command failed: {}", e);
            AdminResponse::Error {
                error: e.to_string(),
            }
        }
    }
}

/// Apply one admin command to storage.
pub fn execute_command(cmd: AdminCommand, storage: &Storage) -> AdminResponse {
    match cmd {
        AdminCommand::SetProfile { profile } => ok_or_error(
            storage.put_profile(&profile),
            format!("Profile set: {}", profile.name),
        ),

        AdminCommand::AddPublication { publication } => ok_or_error(
            storage.put_publication(&publication),
            format!("Added publication: {} ({})", publication.title, publication.year),
        ),

        AdminCommand::AddNews { news } => ok_or_error(
            storage.put_news(&news),
            format!("Added news: {} ({})", news.title, news.date),
        ),

        AdminCommand::Seed { bundle } => ok_or_error(
            storage.seed(&bundle),
            format!(
                "Seeded {} publication(s), {} news item(s){}",
                bundle.publications.len(),
                bundle.news.len(),
                if bundle.profile.is_some() { " and the profile" } else { "" }
            ),
        ),

        AdminCommand::CountMessages => match storage.count_contact_messages() {
            Ok(value) => AdminResponse::Count { value },
            Err(e) => AdminResponse::Error {
                error: e.to_string(),
            },
        },

        AdminCommand::Ping => AdminResponse::Pong,
    }
}
