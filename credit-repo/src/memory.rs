//! In-memory repository adapter.
//!
//! Backed by `DashMap`s; state lives as long as the repository value.
//! Credits are not checked against existing customers.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;

use credit_types::{
    Credit, CreditCode, CreditRepository, Customer, CustomerId, CustomerRepository, RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory customer repository. Ids are assigned sequentially from 1.
pub struct MemoryCustomerRepo {
    customers: DashMap<CustomerId, Customer>,
    next_id: AtomicI64,
    // held across the uniqueness scan and the write
    write_lock: Mutex<()>,
}

impl MemoryCustomerRepo {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            next_id: AtomicI64::new(1),
            write_lock: Mutex::new(()),
        }
    }

    /// Number of stored customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    fn check_unique(&self, customer: &Customer) -> Result<(), RepoError> {
        let clash = self.customers.iter().find(|entry| {
            Some(*entry.key()) != customer.id
                && (entry.cpf == customer.cpf || entry.email == customer.email)
        });

        match clash {
            Some(existing) if existing.cpf == customer.cpf => {
                Err(RepoError::Conflict(format!("cpf {} already registered", customer.cpf)))
            }
            Some(_) => Err(RepoError::Conflict(format!(
                "email {} already registered",
                customer.email
            ))),
            None => Ok(()),
        }
    }
}

impl Default for MemoryCustomerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepo {
    async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
        let _guard = self.write_lock.lock().await;
        self.check_unique(&customer)?;

        match customer.id {
            None => {
                let id = CustomerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                let stored = Customer {
                    id: Some(id),
                    ..customer
                };
                self.customers.insert(id, stored.clone());
                Ok(stored)
            }
            Some(id) => match self.customers.get_mut(&id) {
                Some(mut existing) => {
                    *existing = customer.clone();
                    Ok(customer)
                }
                None => Err(RepoError::NotFound),
            },
        }
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
        Ok(self.customers.get(&id).map(|c| c.clone()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credits
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory credit repository keyed by credit code.
pub struct MemoryCreditRepo {
    // sequence number keeps listings in insertion order
    credits: DashMap<CreditCode, (u64, Credit)>,
    seq: AtomicU64,
}

impl MemoryCreditRepo {
    pub fn new() -> Self {
        Self {
            credits: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Number of stored credits.
    pub fn len(&self) -> usize {
        self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }
}

impl Default for MemoryCreditRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CreditRepository for MemoryCreditRepo {
    async fn save(&self, credit: Credit) -> Result<Credit, RepoError> {
        match self.credits.entry(credit.credit_code) {
            Entry::Occupied(_) => Err(RepoError::Conflict(format!(
                "credit code {} already exists",
                credit.credit_code
            ))),
            Entry::Vacant(slot) => {
                let seq = self.seq.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, credit.clone()));
                Ok(credit)
            }
        }
    }

    async fn find_by_credit_code(&self, code: CreditCode) -> Result<Option<Credit>, RepoError> {
        Ok(self.credits.get(&code).map(|entry| entry.1.clone()))
    }

    async fn find_all_by_customer_id(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Credit>, RepoError> {
        let mut owned: Vec<(u64, Credit)> = self
            .credits
            .iter()
            .filter(|entry| entry.1.customer_id == customer_id)
            .map(|entry| entry.value().clone())
            .collect();
        owned.sort_by_key(|(seq, _)| *seq);

        Ok(owned.into_iter().map(|(_, credit)| credit).collect())
    }
}
