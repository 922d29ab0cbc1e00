//! # Credit Hex
//!
//! Application service layer and HTTP adapter for the credit service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (customer and credit orchestration)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Each service is generic over its repository port, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{CreditService, CustomerService};
