//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use credit_types::{
    Credit, CreditCode, CreditRepository, Customer, CustomerId, CustomerRepository, RepoError,
};

use crate::types::{DbCredit, DbCustomer};

// ─────────────────────────────────────────────────────────────────────────────
// Connection & migration
// ─────────────────────────────────────────────────────────────────────────────

/// Opens a pool for `database_url` and runs the schema migration.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    // Ensure on-disk SQLite target directory exists (no-op for in-memory).
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        // Remove query parameters
        let path = path.split('?').next().unwrap_or(path);
        if path != ":memory:" {
            let p = std::path::Path::new(path);
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;

    create_schema(&pool).await?;
    tracing::debug!("SQLite schema ready");

    Ok(pool)
}

/// Creates the database schema (idempotent).
pub async fn create_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let ddl = include_str!("../migrations/0001_create_tables.sql");
    sqlx::query(ddl).execute(pool).await.map_err(map_db_err)?;
    Ok(())
}

/// Maps constraint violations onto the port's error vocabulary.
fn map_db_err(e: sqlx::Error) -> RepoError {
    if let Some(db) = e.as_database_error() {
        match db.kind() {
            ErrorKind::UniqueViolation => return RepoError::Conflict(db.message().to_string()),
            // credit insert with an unknown owner
            ErrorKind::ForeignKeyViolation => return RepoError::NotFound,
            _ => {}
        }
    }
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite customer repository.
#[derive(Clone)]
pub struct SqliteCustomerRepo {
    pool: SqlitePool,
}

impl SqliteCustomerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepo {
    async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
        let income = customer.income.to_string();

        match customer.id {
            None => {
                let result = sqlx::query(
                    r#"INSERT INTO customers (first_name, last_name, cpf, email, password, zip_code, street, income)
                       VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
                )
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(&customer.cpf)
                .bind(&customer.email)
                .bind(&customer.password)
                .bind(&customer.address.zip_code)
                .bind(&customer.address.street)
                .bind(&income)
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;

                Ok(Customer {
                    id: Some(CustomerId::new(result.last_insert_rowid())),
                    ..customer
                })
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"UPDATE customers
                       SET first_name = ?, last_name = ?, cpf = ?, email = ?, password = ?, zip_code = ?, street = ?, income = ?
                       WHERE id = ?"#,
                )
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(&customer.cpf)
                .bind(&customer.email)
                .bind(&customer.password)
                .bind(&customer.address.zip_code)
                .bind(&customer.address.street)
                .bind(&income)
                .bind(id.value())
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;

                if result.rows_affected() == 0 {
                    return Err(RepoError::NotFound);
                }
                Ok(customer)
            }
        }
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, first_name, last_name, cpf, email, password, zip_code, street, income
               FROM customers WHERE id = ?"#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(DbCustomer::into_domain).transpose()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credits
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite credit repository.
#[derive(Clone)]
pub struct SqliteCreditRepo {
    pool: SqlitePool,
}

impl SqliteCreditRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for SqliteCreditRepo {
    async fn save(&self, credit: Credit) -> Result<Credit, RepoError> {
        sqlx::query(
            r#"INSERT INTO credits (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(credit.credit_code.to_string())
        .bind(credit.credit_value.to_string())
        .bind(credit.day_first_installment.format("%Y-%m-%d").to_string())
        .bind(i64::from(credit.number_of_installments))
        .bind(credit.status.to_string())
        .bind(credit.customer_id.value())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(credit)
    }

    async fn find_by_credit_code(&self, code: CreditCode) -> Result<Option<Credit>, RepoError> {
        let row: Option<DbCredit> = sqlx::query_as(
            r#"SELECT credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id
               FROM credits WHERE credit_code = ?"#,
        )
        .bind(code.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(DbCredit::into_domain).transpose()
    }

    async fn find_all_by_customer_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepoError> {
        let rows: Vec<DbCredit> = sqlx::query_as(
            r#"SELECT credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id
               FROM credits WHERE customer_id = ? ORDER BY id ASC"#,
        )
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(DbCredit::into_domain).collect()
    }
}
