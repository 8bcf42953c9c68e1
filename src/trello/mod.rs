//! Remote card repository: outbound access to the Trello REST API.
//!
//! - **client**: `CardRepository` trait and the reqwest-backed `TrelloClient`
//! - **config**: credentials and connection settings
//! - **error**: upstream error taxonomy
//! - **models**: typed views of upstream responses

mod client;
pub mod config;
mod error;
pub mod models;


pub use client::{CardRepository, TrelloClient};
pub use config::{ConfigError, TrelloConfig};
pub use error::{TrelloError, TrelloResult};
