//! Domain models for the credit service.

pub mod credit;
pub mod customer;

pub use credit::{Credit, CreditCode, Status};
pub use customer::{Address, Customer, CustomerId};
