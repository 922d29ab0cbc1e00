//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Field names follow the camelCase wire format of the public API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Address, Credit, CreditCode, Customer, CustomerId, Status};
use crate::error::DomainError;

/// Upper bound on installments accepted through the API.
pub const MAX_INSTALLMENTS: u32 = 48;

fn require(value: &str, field: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl CreateCustomerRequest {
    /// Checks the request shape and builds an unsaved customer from it.
    pub fn into_domain(self) -> Result<Customer, DomainError> {
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")?;
        require(&self.cpf, "cpf")?;
        require(&self.email, "email")?;
        require(&self.password, "password")?;
        require(&self.zip_code, "zipCode")?;
        require(&self.street, "street")?;
        if !self.email.contains('@') {
            return Err(DomainError::ValidationError(
                "email must be a valid address".into(),
            ));
        }

        Customer::new(
            self.first_name,
            self.last_name,
            self.cpf,
            self.email,
            self.password,
            Address::new(self.zip_code, self.street),
            self.income,
        )
    }
}

/// Request to change the mutable fields of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl UpdateCustomerRequest {
    /// Applies the changes to `customer`. Leaves it untouched on error.
    pub fn apply_to(self, customer: &mut Customer) -> Result<(), DomainError> {
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")?;
        require(&self.zip_code, "zipCode")?;
        require(&self.street, "street")?;

        customer.set_income(self.income)?;
        customer.first_name = self.first_name;
        customer.last_name = self.last_name;
        customer.address = Address::new(self.zip_code, self.street);
        Ok(())
    }
}

/// Public view of a customer. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl TryFrom<Customer> for CustomerView {
    type Error = DomainError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: customer.persisted_id()?,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credit DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open a credit for an existing customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: u32,
    pub customer_id: CustomerId,
}

impl CreateCreditRequest {
    /// Checks the API-level constraints. `today` anchors the date check.
    pub fn validate(&self, today: NaiveDate) -> Result<(), DomainError> {
        if self.credit_value <= Decimal::ZERO {
            return Err(DomainError::ValidationError(
                "creditValue must be positive".into(),
            ));
        }
        if !(1..=MAX_INSTALLMENTS).contains(&self.number_of_installments) {
            return Err(DomainError::ValidationError(format!(
                "numberOfInstallments must be between 1 and {}",
                MAX_INSTALLMENTS
            )));
        }
        if self.day_first_installment <= today {
            return Err(DomainError::ValidationError(
                "dayFirstInstallment must be in the future".into(),
            ));
        }
        Ok(())
    }

    /// Builds the credit for its resolved owner.
    pub fn into_domain(self, owner: &Customer) -> Result<Credit, DomainError> {
        Credit::new(
            owner,
            self.credit_value,
            self.day_first_installment,
            self.number_of_installments,
        )
    }
}

/// Query string selecting the requesting customer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub customer_id: CustomerId,
}

/// Detailed view of a single credit, with owner contact data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: CreditCode,
    pub credit_value: Decimal,
    pub number_of_installments: u32,
    pub status: Status,
    pub email_customer: String,
    pub income_customer: Decimal,
}

impl CreditView {
    pub fn new(credit: &Credit, owner: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer: owner.email.clone(),
            income_customer: owner.income,
        }
    }
}

/// Row of a customer's credit listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub credit_code: CreditCode,
    pub credit_value: Decimal,
    pub number_of_installments: u32,
}

impl From<&Credit> for CreditSummary {
    fn from(credit: &Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}
