//! MCP server implementation
//!
//! Implements rmcp's `ServerHandler` by hand: `tools/list` and `tools/call`
//! are answered from the explicit tool registry.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::registry::ToolRegistry;
use super::tools::default_registry;
use crate::bridge::CardBridge;
use crate::trello::CardRepository;

pub const SERVER_NAME: &str = "Trello MCP Connector";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const INSTRUCTIONS: &str =
    "Access Trello boards and cards via MCP tools (search and fetch, plus card management).";

/// Main MCP server coordinator
///
/// Generic over `R: CardRepository`; the registry and bridge are shared
/// read-only between all sessions.
pub struct McpServer<R: CardRepository> {
    bridge: Arc<CardBridge<R>>,
    registry: Arc<ToolRegistry<R>>,
}

impl<R: CardRepository> Clone for McpServer<R> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: CardRepository + 'static> McpServer<R> {
    /// Create a server exposing the default tool set.
    pub fn new(bridge: CardBridge<R>) -> Self {
        Self::with_registry(bridge, default_registry())
    }

    pub fn with_registry(bridge: CardBridge<R>, registry: ToolRegistry<R>) -> Self {
        info!(tools = registry.len(), "Tool registry ready");
        Self {
            bridge: Arc::new(bridge),
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry<R> {
        &self.registry
    }

    /// Registered tools, sorted by name.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.definitions()
    }

    /// Run one tool.
    ///
    /// An unknown name is a protocol error (`-32602`); every failure inside
    /// a known tool comes back as an error envelope in the result.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        debug!("Calling tool");
        match self
            .registry
            .call(Arc::clone(&self.bridge), name, arguments)
            .await
        {
            Some(result) => Ok(result),
            None => {
                warn!("Unknown tool");
                Err(McpError::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
        }
    }
}

impl<R: CardRepository + 'static> ServerHandler for McpServer<R> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::new(SERVER_NAME, SERVER_VERSION))
            .with_instructions(INSTRUCTIONS)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        self.call(&request.name, arguments).await
    }
}
