//! MCP Streamable HTTP service creation

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use super::server::McpServer;
use crate::trello::CardRepository;

/// Create the MCP Streamable HTTP service, ready to be nested into an axum
/// router.
///
/// Every session gets a clone of `server`; clones share the registry and
/// the bridge. Cancelling `cancellation_token` closes open sessions.
pub fn create_mcp_service<R: CardRepository + 'static>(
    server: McpServer<R>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<R>, LocalSessionManager> {
    // rmcp expects an io::Error from the factory
    let service_factory = move || -> Result<McpServer<R>, std::io::Error> { Ok(server.clone()) };

    let config = StreamableHttpServerConfig::default()
        .with_sse_keep_alive(None)
        .with_sse_retry(None)
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
