//! Trello MCP connector binary.
//!
//! Builds the concrete Trello client from the environment and hands it to
//! the HTTP layer, which only knows about the `CardRepository` trait.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;
use trello_mcp::api::{self, ApiError, Config};
use trello_mcp::bridge::CardBridge;
use trello_mcp::trello::{ConfigError, TrelloClient, TrelloConfig, TrelloError};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] TrelloError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "trello-mcp")]
#[command(author, version, about = "MCP connector for Trello", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Seconds between SSE liveness pings
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..))]
    ping_interval_secs: u64,

    /// Trello API base URL (overrides TRELLO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Upstream request timeout in seconds (overrides TRELLO_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await.map_err(Into::into)
}

async fn run() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let _ = rustls::crypto::ring::default_provider().install_default();
    api::init_tracing();

    let mut trello = TrelloConfig::from_env()?;
    if let Some(url) = cli.api_url {
        trello = trello.with_base_url(url);
    }
    if let Some(secs) = cli.timeout_secs {
        trello = trello.with_timeout(Duration::from_secs(secs));
    }
    info!(base_url = %trello.base_url, timeout = ?trello.timeout, "Trello upstream configured");

    let client = TrelloClient::new(trello)?;

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
            ping_interval: Duration::from_secs(cli.ping_interval_secs),
        },
        CardBridge::new(client),
    )
    .await?;

    Ok(())
}
