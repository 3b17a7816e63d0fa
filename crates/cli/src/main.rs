mod commands;
mod config;
mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use mcp::Client;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::Cli;
use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "mcp-client.toml";
const LOG_ENV: &str = "MCP_CLIENT_LOG";

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only the JSON result.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut server = load_config(cli.config.as_deref())?.into_server_config();
    if let Some(command) = cli.server {
        server.command = command;
    }
    if let Some(secs) = cli.timeout {
        server.request_timeout = Duration::from_secs(secs);
    }
    debug!(command = %server.command.display(), "using server");

    let request = cli.command.into_request().map_err(Error::Request)?;
    let client = Client::new(server);
    let outcome = request.send(&client).await;
    client.shutdown().await;

    let result = outcome?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        Some(path) => Ok(Config::load(path)?),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE);
            if default_path.exists() {
                Ok(Config::load(&default_path)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}
