use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{ClientRecord, CompanySummary};
use crate::repositories::traits::ClientLoader;
use async_trait::async_trait;
use std::time::Duration;

/// Wraps a loader so a slow company load fails with [`DirectoryError::Timeout`].
///
/// The search engine treats the timeout like any other load failure.
pub struct TimeoutLoader<L> {
    inner: L,
    timeout: Duration,
}

impl<L> TimeoutLoader<L> {
    pub fn new(inner: L, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<L: ClientLoader> ClientLoader for TimeoutLoader<L> {
    async fn load_clients(&self, company: &CompanySummary) -> DirectoryResult<Vec<ClientRecord>> {
        tokio::time::timeout(self.timeout, self.inner.load_clients(company))
            .await
            .map_err(|_| DirectoryError::Timeout(company.id.clone()))?
    }
}
