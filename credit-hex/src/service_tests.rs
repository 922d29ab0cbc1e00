//! CustomerService and CreditService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use credit_types::{
        Address, AppError, BusinessError, Credit, CreditCode, CreditRepository, Customer,
        CustomerId, CustomerRepository, RepoError, Status, UpdateCustomerRequest,
    };

    use crate::{CreditService, CustomerService};

    /// Customer repository stub with a fixed set of customers.
    pub struct StubCustomerRepo {
        customers: Mutex<HashMap<CustomerId, Customer>>,
        next_id: Mutex<i64>,
    }

    impl StubCustomerRepo {
        pub fn new() -> Self {
            Self {
                customers: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }

        pub fn with(customer: Customer) -> Self {
            let repo = Self::new();
            let id = customer.id.expect("fixture customer needs an id");
            repo.customers.lock().unwrap().insert(id, customer);
            repo
        }
    }

    #[async_trait]
    impl CustomerRepository for StubCustomerRepo {
        async fn save(&self, customer: Customer) -> Result<Customer, RepoError> {
            let customer = match customer.id {
                Some(_) => customer,
                None => {
                    let mut next = self.next_id.lock().unwrap();
                    let id = CustomerId::new(*next);
                    *next += 1;
                    Customer {
                        id: Some(id),
                        ..customer
                    }
                }
            };
            self.customers
                .lock()
                .unwrap()
                .insert(customer.id.unwrap(), customer.clone());
            Ok(customer)
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepoError> {
            Ok(self.customers.lock().unwrap().get(&id).cloned())
        }
    }

    /// Credit repository stub: answers lookups with a canned credit and
    /// records every call it receives.
    pub struct StubCreditRepo {
        stored: Option<Credit>,
        save_returns: Option<Credit>,
        saved: Mutex<Vec<Credit>>,
        lookups: Mutex<Vec<CreditCode>>,
        fail_with_database_error: bool,
    }

    impl StubCreditRepo {
        pub fn empty() -> Self {
            Self {
                stored: None,
                save_returns: None,
                saved: Mutex::new(Vec::new()),
                lookups: Mutex::new(Vec::new()),
                fail_with_database_error: false,
            }
        }

        /// Every lookup returns `credit`, whatever code is asked for.
        pub fn returning(credit: Credit) -> Self {
            Self {
                stored: Some(credit),
                ..Self::empty()
            }
        }

        /// `save` ignores its input and returns `credit`.
        pub fn saving_as(credit: Credit) -> Self {
            Self {
                save_returns: Some(credit),
                ..Self::empty()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_with_database_error: true,
                ..Self::empty()
            }
        }

        pub fn saved(&self) -> Vec<Credit> {
            self.saved.lock().unwrap().clone()
        }

        pub fn lookups(&self) -> Vec<CreditCode> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CreditRepository for StubCreditRepo {
        async fn save(&self, credit: Credit) -> Result<Credit, RepoError> {
            self.saved.lock().unwrap().push(credit.clone());
            Ok(self.save_returns.clone().unwrap_or(credit))
        }

        async fn find_by_credit_code(&self, code: CreditCode) -> Result<Option<Credit>, RepoError> {
            self.lookups.lock().unwrap().push(code);
            if self.fail_with_database_error {
                return Err(RepoError::Database("connection reset".into()));
            }
            Ok(self.stored.clone())
        }

        async fn find_all_by_customer_id(
            &self,
            customer_id: CustomerId,
        ) -> Result<Vec<Credit>, RepoError> {
            Ok(self
                .stored
                .iter()
                .chain(self.saved.lock().unwrap().iter())
                .filter(|c| c.customer_id == customer_id)
                .cloned()
                .collect())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fixtures
    // ─────────────────────────────────────────────────────────────────────────

    fn build_customer(id: i64) -> Customer {
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
        customer.id = Some(CustomerId::new(id));
        customer
    }

    fn build_credit(customer: &Customer) -> Credit {
        Credit::new(
            customer,
            Decimal::new(1000, 0),
            NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
            10,
        )
        .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CreditService
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_credit_returns_repository_value() {
        let credit = build_credit(&build_customer(1));
        let service = CreditService::new(StubCreditRepo::empty());

        let actual = service.save(credit.clone()).await.unwrap();

        assert_eq!(actual, credit);
        assert_eq!(service.repo().saved(), vec![credit]);
    }

    #[tokio::test]
    async fn test_save_credit_passes_through_what_repository_returns() {
        let owner = build_customer(1);
        let submitted = build_credit(&owner);
        let stored = Credit {
            status: Status::Approved,
            ..build_credit(&owner)
        };
        let service = CreditService::new(StubCreditRepo::saving_as(stored.clone()));

        let actual = service.save(submitted.clone()).await.unwrap();

        assert_eq!(actual, stored);
        assert_eq!(service.repo().saved(), vec![submitted]);
    }

    #[tokio::test]
    async fn test_find_credit_by_credit_code() {
        let owner = build_customer(1);
        let credit = build_credit(&owner);
        let service = CreditService::new(StubCreditRepo::returning(credit.clone()));

        let actual = service
            .find_by_credit_code(CustomerId::new(1), credit.credit_code)
            .await
            .unwrap();

        assert_eq!(actual, credit);
        assert_eq!(service.repo().lookups(), vec![credit.credit_code]);
    }

    #[tokio::test]
    async fn test_find_credit_owned_by_other_customer_fails() {
        let credit = build_credit(&build_customer(1));
        let service = CreditService::new(StubCreditRepo::returning(credit.clone()));

        let err = service
            .find_by_credit_code(CustomerId::new(2), credit.credit_code)
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            AppError::Business(BusinessError::CreditNotFound(code)) if *code == credit.credit_code
        ));
        assert_eq!(err.to_string(), format!("Id {} not found", credit.credit_code));
        assert_eq!(service.repo().lookups().len(), 1);
    }

    #[tokio::test]
    async fn test_find_credit_with_mismatched_code_reports_requested_code() {
        // same owner, but the repository hands back a credit with another code
        let stored = build_credit(&build_customer(5));
        let requested = CreditCode::new();
        let service = CreditService::new(StubCreditRepo::returning(stored));

        let err = service
            .find_by_credit_code(CustomerId::new(5), requested)
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            AppError::Business(BusinessError::CreditNotFound(code)) if *code == requested
        ));
        assert_eq!(err.to_string(), format!("Id {} not found", requested));
        assert_eq!(service.repo().lookups(), vec![requested]);
    }

    #[tokio::test]
    async fn test_find_unknown_credit_code_fails() {
        let service = CreditService::new(StubCreditRepo::empty());
        let code = CreditCode::new();

        let err = service
            .find_by_credit_code(CustomerId::new(1), code)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Business(BusinessError::CreditNotFound(c)) if c == code
        ));
    }

    #[tokio::test]
    async fn test_find_credit_propagates_repository_failure() {
        let service = CreditService::new(StubCreditRepo::failing());

        let result = service
            .find_by_credit_code(CustomerId::new(1), CreditCode::new())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_find_all_by_customer() {
        let alice = build_customer(1);
        let service = CreditService::new(StubCreditRepo::empty());
        let first = service.save(build_credit(&alice)).await.unwrap();
        let second = service.save(build_credit(&alice)).await.unwrap();
        service.save(build_credit(&build_customer(2))).await.unwrap();

        let credits = service
            .find_all_by_customer(CustomerId::new(1))
            .await
            .unwrap();

        assert_eq!(credits, vec![first, second]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // CustomerService
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_customer_assigns_id() {
        let service = CustomerService::new(StubCustomerRepo::new());
        let mut customer = build_customer(1);
        customer.id = None;

        let saved = service.save(customer).await.unwrap();

        assert_eq!(saved.id, Some(CustomerId::new(1)));
    }

    #[tokio::test]
    async fn test_find_customer_by_id() {
        let customer = build_customer(5);
        let service = CustomerService::new(StubCustomerRepo::with(customer.clone()));

        let actual = service.find_by_id(CustomerId::new(5)).await.unwrap();

        assert_eq!(actual, customer);
    }

    #[tokio::test]
    async fn test_find_unknown_customer_fails() {
        let service = CustomerService::new(StubCustomerRepo::new());

        let err = service.find_by_id(CustomerId::new(9)).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Business(BusinessError::CustomerNotFound(_))
        ));
        assert_eq!(err.to_string(), "Id 9 not found");
    }

    #[tokio::test]
    async fn test_update_customer() {
        let service = CustomerService::new(StubCustomerRepo::with(build_customer(5)));

        let updated = service
            .update(
                CustomerId::new(5),
                UpdateCustomerRequest {
                    first_name: "Camila".to_string(),
                    last_name: "Souza".to_string(),
                    income: Decimal::new(3000, 0),
                    zip_code: "54321".to_string(),
                    street: "Rua Nova".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Camila");
        let stored = service.find_by_id(CustomerId::new(5)).await.unwrap();
        assert_eq!(stored.income, Decimal::new(3000, 0));
        assert_eq!(stored.email, "camila@gmail.com");
    }

    #[tokio::test]
    async fn test_update_with_negative_income_fails() {
        let service = CustomerService::new(StubCustomerRepo::with(build_customer(5)));

        let result = service
            .update(
                CustomerId::new(5),
                UpdateCustomerRequest {
                    first_name: "Camila".to_string(),
                    last_name: "Souza".to_string(),
                    income: Decimal::new(-1, 0),
                    zip_code: "54321".to_string(),
                    street: "Rua Nova".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
