//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use tokio_util::sync::CancellationToken;

use super::handlers::DiscoveryDocument;
use crate::bridge::CardBridge;
use crate::mcp::McpServer;
use crate::trello::CardRepository;

/// Shared application state.
///
/// Generic over `R: CardRepository` so tests can swap in an in-memory
/// upstream. Everything inside is read-only after construction.
pub struct AppState<R: CardRepository> {
    mcp: McpServer<R>,
    discovery: Arc<DiscoveryDocument>,
    ping_interval: Duration,
    shutdown: CancellationToken,
}

// Manual Clone impl - R itself does not need to be Clone
impl<R: CardRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            mcp: self.mcp.clone(),
            discovery: Arc::clone(&self.discovery),
            ping_interval: self.ping_interval,
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<R: CardRepository + 'static> AppState<R> {
    /// Create the state; builds the tool registry once.
    ///
    /// * `bridge` - search/fetch bridge over the upstream repository
    /// * `ping_interval` - period of SSE liveness ticks
    /// * `shutdown` - cancelled when the server stops; ends SSE streams
    pub fn new(bridge: CardBridge<R>, ping_interval: Duration, shutdown: CancellationToken) -> Self {
        let mcp = McpServer::new(bridge);
        let discovery = Arc::new(DiscoveryDocument::new(mcp.registry().names()));

        Self {
            mcp,
            discovery,
            ping_interval,
            shutdown,
        }
    }

    pub fn mcp(&self) -> &McpServer<R> {
        &self.mcp
    }

    pub fn ping_interval(&self) -> Duration {
        self.ping_interval
    }

    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}

impl<R: CardRepository> FromRef<AppState<R>> for Arc<DiscoveryDocument> {
    fn from_ref(state: &AppState<R>) -> Self {
        Arc::clone(&state.discovery)
    }
}
