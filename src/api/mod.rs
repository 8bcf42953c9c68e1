//! HTTP boundary: MCP transport, SSE handshake, discovery, health.

pub mod handlers;
mod routes;
pub mod sse;
pub mod state;


use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use routes::{ApiDoc, create_router};
pub use state::AppState;

use crate::bridge::CardBridge;
use crate::trello::CardRepository;

/// Default SSE liveness interval.
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(trello_mcp::api::bind),
        help("Is another process already listening on this port? Try --port.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(trello_mcp::api::serve))]
    Serve(#[source] std::io::Error),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Interval between SSE liveness ticks
    pub ping_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            ping_interval: DEFAULT_PING_INTERVAL,
        }
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trello_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the server until Ctrl-C.
pub async fn run<R: CardRepository + 'static>(
    config: Config,
    bridge: CardBridge<R>,
) -> Result<(), ApiError> {
    let shutdown = CancellationToken::new();
    let state = AppState::new(bridge, config.ping_interval, shutdown.clone());
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;

    info!("MCP server listening on http://{}", addr);
    info!("   MCP:       http://{}{}", addr, handlers::MCP_PATH);
    info!("   SSE:       http://{}{}", addr, handlers::SSE_PATH);
    info!("   Discovery: http://{}/.well-known/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(ApiError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving until the token is cancelled elsewhere.
        shutdown.cancelled().await;
        return;
    }
    info!("Shutdown requested");
    shutdown.cancel();
}
