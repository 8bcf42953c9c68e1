//! MCP connector that lets assistants search, read and edit Trello cards.

pub mod api;
pub mod bridge;
pub mod mcp;
pub mod trello;

#[cfg(test)]
mod testing;
