//! # Credit Types
//!
//! Domain types and port traits for the credit management service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Customer, Address, Credit, Status)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, business and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Address, Credit, CreditCode, Customer, CustomerId, Status};
pub use dto::*;
pub use error::{AppError, BusinessError, DomainError, RepoError};
pub use ports::{CreditRepository, CustomerRepository};
