//! Directory service layer.
//!
//! Business logic for listing companies, fetching or exporting one company's clients,
//! and ranked search.

use crate::error::{DirectoryError, DirectoryResult};
use crate::mapping::ClientExport;
use crate::models::{Company, CompanySummary};
use crate::observability::{SearchMetrics, Timer};
use crate::repositories::{CompanyRepository, TimeoutLoader};
use crate::search::{ClientFilter, RelevanceSearch, SearchOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Per-company client load timeout used unless configured otherwise.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Directory service trait for business operations.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// The company index, sorted by display name.
    async fn list_companies(&self) -> DirectoryResult<Vec<CompanySummary>>;

    /// One company with the clients `filter` keeps.
    async fn get_company(
        &self,
        company_id: &str,
        filter: &ClientFilter,
    ) -> DirectoryResult<Company>;

    /// The clients `filter` keeps, rendered as a comma-delimited file.
    async fn export_clients(
        &self,
        company_id: &str,
        filter: &ClientFilter,
    ) -> DirectoryResult<ClientExport>;

    /// Ranked search; an empty query returns the index unranked.
    async fn search(&self, query: &str) -> DirectoryResult<SearchOutcome>;
}

/// Default implementation of DirectoryService.
pub struct DirectoryServiceImpl {
    repository: Arc<dyn CompanyRepository>,
    engine: RelevanceSearch,
    metrics: SearchMetrics,
    load_timeout: Duration,
}

/// Validation helper functions.
impl DirectoryServiceImpl {
    fn validate_query(query: &str) -> Result<(), String> {
        if query.chars().count() > 500 {
            return Err("Search query too long (max 500 characters)".to_string());
        }
        Ok(())
    }

    fn validate_company_id(company_id: &str) -> Result<(), String> {
        if company_id.trim().is_empty() {
            return Err("Company ID cannot be empty".to_string());
        }
        if company_id.len() > 100 {
            return Err("Company ID too long".to_string());
        }
        Ok(())
    }

    fn validate_filter(filter: &ClientFilter) -> Result<(), String> {
        if filter.query().chars().count() > 500 {
            return Err("Client filter too long (max 500 characters)".to_string());
        }
        Ok(())
    }
}

impl DirectoryServiceImpl {
    /// Create a new directory service.
    ///
    /// # Arguments
    /// * `repository` - Source of directory snapshots
    /// * `engine` - Relevance search engine
    /// * `metrics` - Counters shared with the caller
    pub fn new(
        repository: Arc<dyn CompanyRepository>,
        engine: RelevanceSearch,
        metrics: SearchMetrics,
    ) -> Self {
        Self {
            repository,
            engine,
            metrics,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Bound each company's client load during a search.
    pub fn with_load_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    async fn filtered_company(
        &self,
        operation: &str,
        company_id: &str,
        filter: &ClientFilter,
    ) -> DirectoryResult<Company> {
        Self::validate_company_id(company_id).map_err(DirectoryError::InvalidRequest)?;
        Self::validate_filter(filter).map_err(DirectoryError::InvalidRequest)?;

        let result = self.repository.get_company(company_id).await;
        self.metrics.track_lookup(operation, result.is_ok());

        let company = filter.apply(result?);
        tracing::debug!(
            company = %company.id,
            query = %filter.query(),
            activity = ?filter.activity(),
            kept = company.clients.len(),
            total = company.total_clients,
            "Filtered company clients"
        );
        Ok(company)
    }
}

#[async_trait]
impl DirectoryService for DirectoryServiceImpl {
    async fn list_companies(&self) -> DirectoryResult<Vec<CompanySummary>> {
        let result = self.repository.list_companies().await;
        self.metrics.track_lookup("list_companies", result.is_ok());
        result
    }

    async fn get_company(
        &self,
        company_id: &str,
        filter: &ClientFilter,
    ) -> DirectoryResult<Company> {
        self.filtered_company("get_company", company_id, filter).await
    }

    async fn export_clients(
        &self,
        company_id: &str,
        filter: &ClientFilter,
    ) -> DirectoryResult<ClientExport> {
        let company = self
            .filtered_company("export_clients", company_id, filter)
            .await?;
        ClientExport::render(&company.name, &company.clients)
    }

    async fn search(&self, query: &str) -> DirectoryResult<SearchOutcome> {
        Self::validate_query(query).map_err(DirectoryError::InvalidRequest)?;

        // Index and clients must come from the same read of the exports
        let snapshot = self.repository.snapshot().await?;
        let loader = TimeoutLoader::new(snapshot.clone(), self.load_timeout);

        let timer = Timer::new("search");
        let (outcome, report) = self
            .engine
            .search_with_report(query, snapshot.index(), &loader)
            .await;
        let duration_ms = timer.finish();

        if outcome.is_passthrough() {
            self.metrics.track_passthrough(outcome.len());
        } else {
            self.metrics.track_search(&report, outcome.len(), duration_ms);
        }

        Ok(outcome)
    }
}
