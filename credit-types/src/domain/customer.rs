//! Customer domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Numeric identifier of a persisted Customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wraps a raw database identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Postal address, owned by exactly one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

impl Address {
    pub fn new(zip_code: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            street: street.into(),
        }
    }
}

/// An account holder that may own any number of credits.
///
/// `id` stays `None` until the customer has been saved through a
/// `CustomerRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    /// Tax id, unique across customers.
    pub cpf: String,
    /// Unique across customers.
    pub email: String,
    /// Opaque; never exposed through response DTOs.
    #[serde(skip_serializing)]
    pub password: String,
    pub address: Address,
    pub income: Decimal,
}

impl Customer {
    /// Creates a new, not yet persisted customer.
    ///
    /// # Validation
    /// - Income cannot be negative
    pub fn new(
        first_name: String,
        last_name: String,
        cpf: String,
        email: String,
        password: String,
        address: Address,
        income: Decimal,
    ) -> Result<Self, DomainError> {
        validate_income(income)?;

        Ok(Self {
            id: None,
            first_name,
            last_name,
            cpf,
            email,
            password,
            address,
            income,
        })
    }

    /// Creates a customer with all fields specified (for database reconstruction).
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: CustomerId,
        first_name: String,
        last_name: String,
        cpf: String,
        email: String,
        password: String,
        address: Address,
        income: Decimal,
    ) -> Self {
        Self {
            id: Some(id),
            first_name,
            last_name,
            cpf,
            email,
            password,
            address,
            income,
        }
    }

    /// Returns the id, or an error when the customer was never persisted.
    pub fn persisted_id(&self) -> Result<CustomerId, DomainError> {
        self.id.ok_or(DomainError::CustomerNotPersisted)
    }

    /// Replaces the declared income.
    pub fn set_income(&mut self, income: Decimal) -> Result<(), DomainError> {
        validate_income(income)?;
        self.income = income;
        Ok(())
    }
}

fn validate_income(income: Decimal) -> Result<(), DomainError> {
    if income < Decimal::ZERO {
        return Err(DomainError::ValidationError(
            "Income cannot be negative".into(),
        ));
    }
    Ok(())
}
