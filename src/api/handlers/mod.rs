pub mod system;

pub use system::{
    DiscoveryDocument, DiscoveryEndpoints, HealthResponse, MCP_PATH, SSE_PATH, discovery, health,
    root,
};
