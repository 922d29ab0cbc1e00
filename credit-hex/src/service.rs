//! Credit Application Services
//!
//! Orchestrate domain operations through the repository ports.
//! Contain NO infrastructure logic - pure business orchestration.

use credit_types::{
    AppError, BusinessError, Credit, CreditCode, CreditRepository, Customer, CustomerId,
    CustomerRepository, UpdateCustomerRequest,
};

// ─────────────────────────────────────────────────────────────────────────────
// Customer Service
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for customer registration and lookup.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a new customer service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Registers a customer and returns it with its assigned id.
    #[tracing::instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        self.repo.save(customer).await.map_err(Into::into)
    }

    /// Gets a customer by ID.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer, AppError> {
        match self.repo.find_by_id(id).await? {
            Some(customer) => Ok(customer),
            None => {
                tracing::warn!(customer_id = %id, "customer not found");
                Err(BusinessError::CustomerNotFound(id).into())
            }
        }
    }

    /// Applies `changes` to an existing customer and stores the result.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: CustomerId,
        changes: UpdateCustomerRequest,
    ) -> Result<Customer, AppError> {
        let mut customer = self.find_by_id(id).await?;
        changes.apply_to(&mut customer)?;

        self.repo.save(customer).await.map_err(Into::into)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credit Service
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for credits.
///
/// Generic over `R: CreditRepository` - the adapter is injected at compile time.
pub struct CreditService<R: CreditRepository> {
    repo: R,
}

impl<R: CreditRepository> CreditService<R> {
    /// Creates a new credit service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Stores a credit and returns what the repository stored.
    #[tracing::instrument(skip(self, credit), fields(credit_code = %credit.credit_code))]
    pub async fn save(&self, credit: Credit) -> Result<Credit, AppError> {
        self.repo.save(credit).await.map_err(Into::into)
    }

    /// Looks up a credit on behalf of `customer_id`.
    ///
    /// An unknown code, a record carrying another code, and a code owned by
    /// someone else all fail the same way, with `BusinessError::CreditNotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_credit_code(
        &self,
        customer_id: CustomerId,
        credit_code: CreditCode,
    ) -> Result<Credit, AppError> {
        match self.repo.find_by_credit_code(credit_code).await? {
            Some(credit)
                if credit.credit_code == credit_code && credit.is_owned_by(customer_id) =>
            {
                Ok(credit)
            }
            Some(_) | None => {
                tracing::warn!(%credit_code, %customer_id, "credit not found for customer");
                Err(BusinessError::CreditNotFound(credit_code).into())
            }
        }
    }

    /// Lists the credits of a customer, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn find_all_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, AppError> {
        self.repo
            .find_all_by_customer_id(customer_id)
            .await
            .map_err(Into::into)
    }
}
