//! UnitSnap MCP Server
//!
//! MCP Server (protocol 2025-11-25) over stdio
//!
//! Tools:
//! - convert: Convert a value with one converter
//! - list_converters / search: Discover converters and their unit keys
//! - call / help: Invoke or document a conversion function by name
//! - history / clear_history / export_history: Recent conversions
//! - set_theme: Persisted light/dark preference
//!
//! Environment:
//! - UNITSNAP_DATA_PATH: state directory (default ./.unitsnap)
//! - UNITSNAP_PRECISION: significant digits in results (default 6)
//! - RUST_LOG: log filter, logs go to stderr (default info)

mod server;

use server::{McpError, McpRequest, McpResponse, Server, PROTOCOL_VERSION, SERVER_VERSION};
use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use unitsnap::{AppState, FileStorage, Snap};
use unitsnap_core::DEFAULT_PRECISION;

/// Get the data path from environment
fn data_path() -> PathBuf {
    env::var("UNITSNAP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./.unitsnap"))
}

fn precision() -> u32 {
    match env::var("UNITSNAP_PRECISION") {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(p) if p > 0 => p,
            _ => {
                warn!(value = %raw, "ignoring invalid UNITSNAP_PRECISION");
                DEFAULT_PRECISION
            }
        },
        Err(_) => DEFAULT_PRECISION,
    }
}

/// Logs go to stderr; stdout carries the protocol
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

fn main() {
    init_logging();

    let path = data_path();
    let snap = Snap::with_standard_library().with_precision(precision());
    let state = AppState::load(FileStorage::new(&path));
    let mut server = Server::new(snap, state);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "UnitSnap MCP Server started");
    info!(
        data_path = %path.display(),
        theme = %server.state().theme(),
        history = server.state().history().len(),
        "restored state"
    );
    debug!(
        stdin_terminal = io::stdin().is_terminal(),
        stdout_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    // Line-based protocol
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    info!("Server ready, waiting for requests...");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!(bytes = line.len(), "received");

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "unparseable request");
                        if let Err(e) = write_response(&McpResponse::failure(None, McpError::parse_error(e))) {
                            error!(error = %e, "cannot write response");
                            break;
                        }
                        continue;
                    }
                };

                debug!(method = %request.method, "processing");
                let response = server.handle_request(&request);

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    continue;
                }

                if let Err(e) = write_response(&response) {
                    error!(error = %e, "cannot write response");
                    break;
                }
                debug!(method = %request.method, "sent response");
            }
            Err(e) => {
                error!(error = %e, "cannot read input");
                break;
            }
        }
    }

    info!("Server shutting down");
}
