//! folio-admin CLI tool
//!
//! Seeds portfolio content into a running folio-node.
//!
//! Usage:
//!   folio-admin set-profile <profile.json>
//!   folio-admin add-publication <publication.json>
//!   folio-admin add-news <news.json>
//!   folio-admin seed <bundle.json>
//!   folio-admin count-messages
//!   folio-admin ping

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Admin command sent over the socket. Records travel as raw JSON; the node validates them.
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum AdminCommand {
    SetProfile { profile: serde_json::Value },
    AddPublication { publication: serde_json::Value },
    AddNews { news: serde_json::Value },
    Seed { bundle: serde_json::Value },
    CountMessages,
    Ping,
}

/// Response from admin command.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    Count { value: usize },
    Pong,
}

fn print_usage() {
    eprintln!("folio-admin - Seed Folio portfolio content");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  folio-admin set-profile <file.json>      Replace the profile");
    eprintln!("  folio-admin add-publication <file.json>  Add one publication");
    eprintln!("  folio-admin add-news <file.json>         Add one news item");
    eprintln!("  folio-admin seed <file.json>             Load a content bundle atomically");
    eprintln!("  folio-admin count-messages               Count stored contact messages");
    eprintln!("  folio-admin ping                         Check if the node is running");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FOLIO_ADMIN_SOCKET  Path to admin socket (default: $FOLIO_DATA_DIR/admin.sock)");
    eprintln!("  FOLIO_DATA_DIR      Data directory (default: ./folio-data)");
}

fn get_socket_path() -> PathBuf {
    if let Ok(path) = std::env::var("FOLIO_ADMIN_SOCKET") {
        return PathBuf::from(path);
    }
    let data_dir = std::env::var("FOLIO_DATA_DIR").unwrap_or_else(|_| "./folio-data".to_string());
    PathBuf::from(data_dir).join("admin.sock")
}

fn read_json(args: &[String], command: &str) -> Result<serde_json::Value, String> {
    let path = args
        .get(2)
        .ok_or_else(|| format!("{} requires a JSON file argument", command))?;
    let data =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    serde_json::from_str(&data).map_err(|e| format!("Invalid JSON in {}: {}", path, e))
}

fn send_command(cmd: AdminCommand) -> Result<AdminResponse, String> {
    let socket_path = get_socket_path();

    let mut stream = UnixStream::connect(&socket_path).map_err(|e| {
        format!(
            "Failed to connect to folio-node at {:?}: {}\n\
             Is the folio-node running?",
            socket_path, e
        )
    })?;

    // Send command
    let cmd_json = serde_json::to_string(&cmd).map_err(|e| e.to_string())?;
    writeln!(stream, "{}", cmd_json).map_err(|e| e.to_string())?;

    // Read response
    let mut reader = BufReader::new(&stream);
    let mut response_line = String::new();
    reader
        .read_line(&mut response_line)
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&response_line).map_err(|e| format!("Invalid response: {}", e))
}

fn parse_command(args: &[String]) -> Result<AdminCommand, String> {
    match args[1].as_str() {
        "set-profile" => Ok(AdminCommand::SetProfile {
            profile: read_json(args, "set-profile")?,
        }),
        "add-publication" => Ok(AdminCommand::AddPublication {
            publication: read_json(args, "add-publication")?,
        }),
        "add-news" => Ok(AdminCommand::AddNews {
            news: read_json(args, "add-news")?,
        }),
        "seed" => Ok(AdminCommand::Seed {
            bundle: read_json(args, "seed")?,
        }),
        "count-messages" => Ok(AdminCommand::CountMessages),
        "ping" => Ok(AdminCommand::Ping),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    if matches!(args[1].as_str(), "-h" | "--help" | "help") {
        print_usage();
        std::process::exit(0);
    }

    let cmd = match parse_command(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    match send_command(cmd) {
        Ok(response) => match response {
            AdminResponse::Ok { message } => {
                println!("{}", message);
            }
            AdminResponse::Error { error } => {
                eprintln!("Error: {}", error);
                std::process::exit(1);
            }
            AdminResponse::Count { value } => {
                println!("{}", value);
            }
            AdminResponse::Pong => {
                println!("pong - folio-node is running");
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
