//! Repository port traits.
//!
//! Adapters (SQLite, in-memory) implement these traits; the services in
//! `credit-hex` only ever see the traits.

use crate::domain::{Credit, CreditCode, Customer, CustomerId};
use crate::error::RepoError;

/// Persistence port for customers.
#[async_trait::async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// Inserts the customer when it has no id yet, updates it otherwise.
    ///
    /// Returns the stored customer with its id assigned.
    async fn save(&self, customer: Customer) -> Result<Customer, RepoError>;

    /// Gets a customer by ID.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError>;
}

/// Persistence port for credits.
#[async_trait::async_trait]
pub trait CreditRepository: Send + Sync + 'static {
    /// Stores a new credit. A duplicate credit code is a `RepoError::Conflict`.
    async fn save(&self, credit: Credit) -> Result<Credit, RepoError>;

    /// Finds a credit by its code, regardless of owner.
    async fn find_by_credit_code(&self, code: CreditCode) -> Result<Option<Credit>, RepoError>;

    /// Lists the credits owned by a customer, oldest first.
    async fn find_all_by_customer_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepoError>;
}
