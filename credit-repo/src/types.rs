//! Database row types and their conversion into domain types.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;

use credit_types::{Address, Credit, CreditCode, Customer, CustomerId, RepoError, Status};

fn parse_err(e: impl std::fmt::Display) -> RepoError {
    RepoError::Database(e.to_string())
}

/// Customer row from database.
#[derive(FromRow)]
pub struct DbCustomer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
    pub income: String,
}

impl DbCustomer {
    pub fn into_domain(self) -> Result<Customer, RepoError> {
        let income = Decimal::from_str(&self.income).map_err(parse_err)?;

        Ok(Customer::from_parts(
            CustomerId::new(self.id),
            self.first_name,
            self.last_name,
            self.cpf,
            self.email,
            self.password,
            Address::new(self.zip_code, self.street),
            income,
        ))
    }
}

/// Credit row from database.
#[derive(FromRow)]
pub struct DbCredit {
    pub credit_code: String,
    pub credit_value: String,
    pub day_first_installment: String,
    pub number_of_installments: i64,
    pub status: String,
    pub customer_id: i64,
}

impl DbCredit {
    pub fn into_domain(self) -> Result<Credit, RepoError> {
        let credit_code = CreditCode::from_str(&self.credit_code).map_err(parse_err)?;
        let credit_value = Decimal::from_str(&self.credit_value).map_err(parse_err)?;
        let day_first_installment =
            NaiveDate::parse_from_str(&self.day_first_installment, "%Y-%m-%d").map_err(parse_err)?;
        let number_of_installments =
            u32::try_from(self.number_of_installments).map_err(parse_err)?;
        let status = Status::from_str(&self.status)?;

        Ok(Credit::from_parts(
            credit_code,
            credit_value,
            day_first_installment,
            number_of_installments,
            status,
            CustomerId::new(self.customer_id),
        ))
    }
}
