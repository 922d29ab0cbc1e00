//! # Credit Repository
//!
//! Concrete repository implementations (adapters) for the credit service.
//! This crate provides the adapters that implement the `CustomerRepository`
//! and `CreditRepository` ports:
//! - `sqlite` - persistence-backed, via `sqlx`
//! - `memory` - process-local maps, for tests and throwaway runs

#[cfg(not(any(feature = "sqlite", feature = "memory")))]
compile_error!("Enable a repo feature: `sqlite` or `memory`.");

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;


// Re-export individual repos for direct use if needed
#[cfg(feature = "memory")]
pub use memory::{MemoryCreditRepo, MemoryCustomerRepo};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteCreditRepo, SqliteCustomerRepo};

/// The pair of repositories a running service needs.
pub struct Repos<C, K> {
    pub customers: C,
    pub credits: K,
}

/// Build and initialize the SQLite repositories from a database URL.
///
/// This function:
/// 1. Connects to the database
/// 2. Runs migrations to create tables
/// 3. Returns both repositories sharing one connection pool
///
/// # Examples
///
/// ```ignore
/// let repos = build_repos("sqlite://data/credit.db?mode=rwc").await?;
/// ```
#[cfg(feature = "sqlite")]
pub async fn build_repos(
    database_url: &str,
) -> anyhow::Result<Repos<SqliteCustomerRepo, SqliteCreditRepo>> {
    let pool = sqlite::connect(database_url).await?;
    Ok(Repos {
        customers: SqliteCustomerRepo::new(pool.clone()),
        credits: SqliteCreditRepo::new(pool),
    })
}

#[cfg(feature = "memory")]
impl Repos<MemoryCustomerRepo, MemoryCreditRepo> {
    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            customers: MemoryCustomerRepo::new(),
            credits: MemoryCreditRepo::new(),
        }
    }
}
