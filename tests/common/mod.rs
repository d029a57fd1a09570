use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use customer_registry::backend::database::DatabaseBackendConfig;
use customer_registry::backend::{Backend, CustomerBackend};
use customer_registry::config::AppConfig;
use customer_registry::error::{AppError, AppResult};
use customer_registry::models::{Customer, NewCustomer, PersonType, RegistrationForm};
use customer_registry::startup::{build_router, setup_backend};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const INDIVIDUAL_ID: &str = "52998224725";
#[allow(dead_code)]
pub const OTHER_INDIVIDUAL_ID: &str = "11144477735";
#[allow(dead_code)]
pub const ORGANIZATION_ID: &str = "11444777000161";

/// Create backend for testing with in-memory SQLite database
#[allow(dead_code)]
pub async fn setup_test_database() -> Result<Arc<dyn CustomerBackend>, Box<dyn std::error::Error>>
{
    let backend = setup_backend(&test_config()).await?;
    Ok(backend)
}

/// Router and backend sharing the same in-memory database
#[allow(dead_code)]
pub async fn setup_test_app() -> (TestServer, Arc<dyn CustomerBackend>) {
    let config = test_config();
    let backend = setup_backend(&config).await.unwrap();
    let app = build_router(backend.clone(), &config);
    (TestServer::new(app).unwrap(), backend)
}

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.logging.access_log = false;
    config
}

#[allow(dead_code)]
pub fn individual_form(identifier: &str) -> RegistrationForm {
    RegistrationForm {
        name: Some("Maria Silva".to_string()),
        contact: Some("(11) 99999-9999".to_string()),
        representative: None,
        email: Some("maria@example.com".to_string()),
        identifier: Some(identifier.to_string()),
        person_type: Some(PersonType::Individual),
    }
}

#[allow(dead_code)]
pub fn organization_form(identifier: &str) -> RegistrationForm {
    RegistrationForm {
        name: Some("Acme Ltda".to_string()),
        contact: Some("(11) 3333-4444".to_string()),
        representative: Some("João Souza".to_string()),
        email: Some("contato@acme.com.br".to_string()),
        identifier: Some(identifier.to_string()),
        person_type: Some(PersonType::Organization),
    }
}

#[allow(dead_code)]
pub fn individual_json(name: &str, email: &str, identifier: &str) -> Value {
    json!({
        "name": name,
        "contact": "(11) 99999-9999",
        "email": email,
        "identifier": identifier,
        "personType": "individual"
    })
}

#[allow(dead_code)]
pub fn organization_json(identifier: &str) -> Value {
    json!({
        "name": "Acme Ltda",
        "contact": "(11) 3333-4444",
        "representative": "João Souza",
        "email": "contato@acme.com.br",
        "identifier": identifier,
        "personType": "organization"
    })
}

#[allow(dead_code)]
fn stored(customer: &NewCustomer) -> Customer {
    Customer {
        id: uuid::Uuid::new_v4().to_string(),
        name: customer.name.clone(),
        contact: customer.contact.clone(),
        representative: customer.representative.clone(),
        email: customer.email.clone(),
        identifier: customer.identifier.clone(),
        person_type: customer.person_type,
        created_at: Utc::now(),
    }
}

/// In-memory store that enforces identifier uniqueness and counts inserts
#[allow(dead_code)]
#[derive(Default)]
pub struct InMemoryStore {
    customers: Mutex<Vec<Customer>>,
    inserts: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryStore {
    pub fn with_customer(customer: NewCustomer) -> Self {
        let store = Self::default();
        store.customers.lock().unwrap().push(stored(&customer));
        store
    }

    /// Insert attempts, successful or not
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.customers.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for InMemoryStore {
    async fn connect(_config: &DatabaseBackendConfig) -> AppResult<Self> {
        Ok(Self::default())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CustomerBackend for InMemoryStore {
    async fn find_customer_by_identifier(&self, identifier: &str) -> AppResult<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identifier == identifier)
            .cloned())
    }

    async fn create_customer(&self, customer: &NewCustomer) -> AppResult<Customer> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut customers = self.customers.lock().unwrap();
        if customers.iter().any(|c| c.identifier == customer.identifier) {
            return Err(AppError::UniqueViolation("customers.identifier".to_string()));
        }
        let created = stored(customer);
        customers.push(created.clone());
        Ok(created)
    }

    async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        Ok(self.customers())
    }
}

/// Store whose pre-check never sees the competing registration that wins
/// the insert
#[allow(dead_code)]
#[derive(Default)]
pub struct RacingStore {
    /// Record visible once the insert has lost the race
    pub winner: Option<NewCustomer>,
    /// Lookups after the lost insert fail instead of returning the winner
    pub read_back_fails: bool,
    lost: Mutex<bool>,
    inserts: AtomicUsize,
}

#[allow(dead_code)]
impl RacingStore {
    pub fn with_winner(winner: NewCustomer) -> Self {
        Self {
            winner: Some(winner),
            ..Self::default()
        }
    }

    pub fn with_unreadable_winner() -> Self {
        Self {
            read_back_fails: true,
            ..Self::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for RacingStore {
    async fn connect(_config: &DatabaseBackendConfig) -> AppResult<Self> {
        Ok(Self::default())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CustomerBackend for RacingStore {
    async fn find_customer_by_identifier(&self, _identifier: &str) -> AppResult<Option<Customer>> {
        let lost = *self.lost.lock().unwrap();
        if lost && self.read_back_fails {
            Err(AppError::Database("connection reset by peer".to_string()))
        } else if lost {
            Ok(self.winner.as_ref().map(stored))
        } else {
            Ok(None)
        }
    }

    async fn create_customer(&self, _customer: &NewCustomer) -> AppResult<Customer> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        *self.lost.lock().unwrap() = true;
        Err(AppError::UniqueViolation("customers_identifier_key".to_string()))
    }

    async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        Ok(Vec::new())
    }
}

/// Which store operation fails
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailAt {
    Lookup,
    Insert,
}

/// Store that reports a connectivity failure on one operation
#[allow(dead_code)]
pub struct FailingStore {
    pub fail_at: FailAt,
    inserts: AtomicUsize,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for FailingStore {
    async fn connect(_config: &DatabaseBackendConfig) -> AppResult<Self> {
        Ok(Self::new(FailAt::Insert))
    }

    async fn health_check(&self) -> AppResult<()> {
        Err(AppError::Database("connection refused".to_string()))
    }

    async fn init_schema(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CustomerBackend for FailingStore {
    async fn find_customer_by_identifier(&self, _identifier: &str) -> AppResult<Option<Customer>> {
        match self.fail_at {
            FailAt::Lookup => Err(AppError::Database("connection refused".to_string())),
            FailAt::Insert => Ok(None),
        }
    }

    async fn create_customer(&self, _customer: &NewCustomer) -> AppResult<Customer> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Database("connection reset by peer".to_string()))
    }

    async fn find_all_customers(&self) -> AppResult<Vec<Customer>> {
        Err(AppError::Database("connection refused".to_string()))
    }
}
