//! Model Context Protocol (MCP) tool surface
//!
//! - **registry**: explicit name → handler map, built once at startup
//! - **tools**: argument types and handlers for every exposed tool
//! - **server**: rmcp `ServerHandler` answering from the registry
//! - **service**: Streamable HTTP transport mounted at `/mcp`

pub mod registry;
pub mod server;
pub mod service;
pub mod tools;


pub use registry::{ToolEntry, ToolRegistry, tool_result};
pub use server::McpServer;
pub use service::create_mcp_service;
pub use tools::default_registry;
