//! taskcal-provider-google - Google Calendar provider for taskcal
//!
//! This binary implements the taskcal provider protocol, communicating
//! with taskcal via JSON over stdin/stdout. Logs go to stderr.
//!
//! The provider manages its own credentials and sessions:
//!   ~/.config/taskcal/providers/google/app_config.toml
//!   ~/.config/taskcal/providers/google/session/{account}.toml

mod app_config;
mod commands;
mod google_event;
mod remote_config;
mod session;

use std::future::Future;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use taskcal_core::remote::protocol::{Command, ProviderCommand, Request, Response};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    install_tracing();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        writeln!(stdout, "{}", response).context("Failed to write response")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}

async fn handle_request(request: Request) -> String {
    tracing::debug!(command = ?request.command, "handling request");

    match request.command {
        Command::ListEvents => dispatch(request.params, commands::list_events::handle).await,
        Command::CreateEvent => dispatch(request.params, commands::create_event::handle).await,
        Command::UpdateEvent => dispatch(request.params, commands::update_event::handle).await,
        Command::DeleteEvent => dispatch(request.params, commands::delete_event::handle).await,
    }
}

/// Decode the params into the command type, run its handler and encode the
/// result as a protocol response.
async fn dispatch<C, F, Fut>(params: serde_json::Value, handler: F) -> String
where
    C: ProviderCommand + DeserializeOwned,
    C::Response: Serialize,
    F: FnOnce(C) -> Fut,
    Fut: Future<Output = Result<C::Response>>,
{
    let cmd: C = match serde_json::from_value(params) {
        Ok(cmd) => cmd,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match handler(cmd).await {
        Ok(data) => Response::success(data),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "command failed");
            Response::error(&format!("{:#}", e))
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides; quiet by default so the CLI output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
