//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod extract;
mod handlers;
mod server;

pub use extract::{ApiJson, ApiQuery};
pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
