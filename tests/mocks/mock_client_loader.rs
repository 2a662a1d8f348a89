use async_trait::async_trait;
use client_directory::error::{DirectoryError, DirectoryResult};
use client_directory::models::{ClientRecord, CompanySummary};
use client_directory::repositories::ClientLoader;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock client loader for testing.
///
/// Serves configured client lists per company id, can be told to fail for some
/// companies, and records which companies were loaded.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockClientLoader {
    clients: Arc<Mutex<HashMap<String, Vec<ClientRecord>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockClientLoader {
    /// Create a new empty MockClientLoader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `clients` for the company with `company_id`.
    pub fn add_clients(&self, company_id: &str, clients: Vec<ClientRecord>) {
        let mut map = self.clients.lock().unwrap();
        map.insert(company_id.to_string(), clients);
    }

    /// Make every load of `company_id` fail with an I/O error.
    pub fn fail_for(&self, company_id: &str) {
        let mut failing = self.failing.lock().unwrap();
        failing.insert(company_id.to_string());
    }

    /// Delay loads of `company_id` by `delay`.
    pub fn delay_for(&self, company_id: &str, delay: Duration) {
        let mut delays = self.delays.lock().unwrap();
        delays.insert(company_id.to_string(), delay);
    }

    /// Number of loads performed, across all companies.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether the company was ever loaded.
    pub fn was_loaded(&self, company_id: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|id| id == company_id)
    }
}

#[async_trait]
impl ClientLoader for MockClientLoader {
    async fn load_clients(&self, company: &CompanySummary) -> DirectoryResult<Vec<ClientRecord>> {
        self.calls.lock().unwrap().push(company.id.clone());

        let delay = self.delays.lock().unwrap().get(&company.id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(&company.id) {
            return Err(DirectoryError::Io(format!(
                "simulated read failure for {}",
                company.id
            )));
        }

        Ok(self
            .clients
            .lock()
            .unwrap()
            .get(&company.id)
            .cloned()
            .unwrap_or_default())
    }
}
