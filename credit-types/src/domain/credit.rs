//! Credit domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, CustomerId};
use crate::error::DomainError;

/// Globally unique code of a Credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditCode(Uuid);

impl CreditCode {
    /// Creates a new random CreditCode.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreditCode {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CreditCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CreditCode {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle status of a credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    InProgress,
    Approved,
    Rejected,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::InProgress => write!(f, "IN_PROGRESS"),
            Status::Approved => write!(f, "APPROVED"),
            Status::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Status::InProgress),
            "APPROVED" => Ok(Status::Approved),
            "REJECTED" => Ok(Status::Rejected),
            other => Err(DomainError::ValidationError(format!(
                "Unknown credit status: {}",
                other
            ))),
        }
    }
}

/// A loan granted to a customer, repaid in installments.
///
/// The credit only references its owner by id; customers are never
/// owned by their credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Immutable once created
    pub credit_code: CreditCode,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: u32,
    pub status: Status,
    /// Owning customer
    pub customer_id: CustomerId,
}

impl Credit {
    /// Creates a new credit for a persisted customer with a fresh credit code.
    ///
    /// # Validation
    /// - The customer must have been persisted
    /// - Credit value must be positive
    /// - At least one installment
    pub fn new(
        customer: &Customer,
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: u32,
    ) -> Result<Self, DomainError> {
        Self::with_code(
            CreditCode::new(),
            customer,
            credit_value,
            day_first_installment,
            number_of_installments,
        )
    }

    /// Same as [`Credit::new`] with a caller-supplied credit code.
    pub fn with_code(
        credit_code: CreditCode,
        customer: &Customer,
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: u32,
    ) -> Result<Self, DomainError> {
        let customer_id = customer.persisted_id()?;

        if credit_value <= Decimal::ZERO {
            return Err(DomainError::ValidationError(
                "Credit value must be positive".into(),
            ));
        }
        if number_of_installments == 0 {
            return Err(DomainError::ValidationError(
                "Number of installments must be positive".into(),
            ));
        }

        Ok(Self {
            credit_code,
            credit_value,
            day_first_installment,
            number_of_installments,
            status: Status::InProgress,
            customer_id,
        })
    }

    /// Reconstructs a credit from stored fields.
    pub fn from_parts(
        credit_code: CreditCode,
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: u32,
        status: Status,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            credit_code,
            credit_value,
            day_first_installment,
            number_of_installments,
            status,
            customer_id,
        }
    }

    /// Returns true if `customer_id` owns this credit.
    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;

    fn customer(id: Option<i64>) -> Customer {
        let mut customer = Customer::new(
            "Cami".to_string(),
            "Cavalcante".to_string(),
            "28475934625".to_string(),
            "camila@gmail.com".to_string(),
            "12345".to_string(),
            Address::new("12345", "Rua da Cami"),
            Decimal::new(1000, 0),
        )
        .unwrap();
        customer.id = id.map(CustomerId::new);
        customer
    }

    fn first_installment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 15).unwrap()
    }

    #[test]
    fn test_credit_defaults() {
        let owner = customer(Some(1));
        let credit = Credit::new(&owner, Decimal::new(1000, 0), first_installment(), 10).unwrap();

        assert_eq!(credit.status, Status::InProgress);
        assert_eq!(credit.customer_id, CustomerId::new(1));
        assert!(credit.is_owned_by(CustomerId::new(1)));
        assert!(!credit.is_owned_by(CustomerId::new(2)));
    }

    #[test]
    fn test_credit_codes_are_unique() {
        let owner = customer(Some(1));
        let a = Credit::new(&owner, Decimal::ONE, first_installment(), 1).unwrap();
        let b = Credit::new(&owner, Decimal::ONE, first_installment(), 1).unwrap();
        assert_ne!(a.credit_code, b.credit_code);
    }

    #[test]
    fn test_unsaved_owner_fails() {
        let result = Credit::new(&customer(None), Decimal::ONE, first_installment(), 1);
        assert!(matches!(result, Err(DomainError::CustomerNotPersisted)));
    }

    #[test]
    fn test_non_positive_value_fails() {
        let owner = customer(Some(1));
        let result = Credit::new(&owner, Decimal::ZERO, first_installment(), 1);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_zero_installments_fails() {
        let owner = customer(Some(1));
        let result = Credit::new(&owner, Decimal::ONE, first_installment(), 0);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!("APPROVED".parse::<Status>().unwrap(), Status::Approved);
        assert_eq!(Status::InProgress.to_string(), "IN_PROGRESS");
        assert!("PENDING".parse::<Status>().is_err());
    }
}
