//! System health and discovery handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::mcp::server::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};

pub const MCP_PATH: &str = "/mcp";
pub const SSE_PATH: &str = "/sse";

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Endpoint paths advertised to MCP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiscoveryEndpoints {
    /// JSON-RPC endpoint (POST)
    #[schema(example = "/mcp")]
    pub mcp: String,
    /// Handshake and keepalive stream (GET)
    #[schema(example = "/sse")]
    pub sse: String,
}

/// MCP discovery document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub endpoints: DiscoveryEndpoints,
    /// Names of the registered tools
    pub tools: Vec<String>,
}

impl DiscoveryDocument {
    pub fn new(tools: Vec<&str>) -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            endpoints: DiscoveryEndpoints {
                mcp: MCP_PATH.to_string(),
                sse: SSE_PATH.to_string(),
            },
            tools: tools.into_iter().map(str::to_string).collect(),
        }
    }
}

#[instrument]
pub async fn root() -> &'static str {
    SERVER_NAME
}

/// Health check endpoint
///
/// Returns the current health status of the server
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// MCP discovery endpoint
///
/// Describes the server and where its MCP endpoints live
#[utoipa::path(
    get,
    path = "/.well-known/mcp",
    tag = "mcp",
    responses(
        (status = 200, description = "Discovery document", body = DiscoveryDocument)
    )
)]
#[instrument(skip(doc))]
pub async fn discovery(State(doc): State<Arc<DiscoveryDocument>>) -> Json<DiscoveryDocument> {
    Json(doc.as_ref().clone())
}
