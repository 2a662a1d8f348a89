use crate::error::DirectoryResult;
use crate::models::{ClientRecord, Company, CompanySummary};
use crate::repositories::in_memory_directory::InMemoryDirectory;
use async_trait::async_trait;
use std::sync::Arc;

/// Loads the clients of one company on demand.
///
/// The search engine calls this only for companies whose name does not match the
/// query. A failure affects that company alone.
#[async_trait]
pub trait ClientLoader: Send + Sync {
    /// Load every client of `company`, in export order.
    async fn load_clients(&self, company: &CompanySummary) -> DirectoryResult<Vec<ClientRecord>>;
}

/// Read access to the company index and full company data.
///
/// Provides abstraction over where exports live,
/// enabling different implementations (directory on disk, in-memory, mock).
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// One consistent parsed state of the exports.
    ///
    /// The index and every company's clients in a snapshot come from the same read,
    /// so a search should take one snapshot and use it for both.
    async fn snapshot(&self) -> DirectoryResult<Arc<InMemoryDirectory>>;

    /// The company index, sorted by display name.
    async fn list_companies(&self) -> DirectoryResult<Vec<CompanySummary>> {
        Ok(self.snapshot().await?.index().to_vec())
    }

    /// A single company with its clients.
    async fn get_company(&self, id: &str) -> DirectoryResult<Company> {
        self.snapshot().await?.find(id)
    }
}

#[async_trait]
impl<T: ClientLoader + ?Sized> ClientLoader for Arc<T> {
    async fn load_clients(&self, company: &CompanySummary) -> DirectoryResult<Vec<ClientRecord>> {
        (**self).load_clients(company).await
    }
}
