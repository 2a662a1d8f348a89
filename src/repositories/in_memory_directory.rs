use crate::error::{DirectoryError, DirectoryResult};
use crate::mapping::import_export;
use crate::models::{sort_by_name, ClientRecord, Company, CompanySummary};
use crate::repositories::traits::{ClientLoader, CompanyRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Caller-owned, pre-built company directory.
///
/// Built once from export texts; searches read from it without any I/O. Clones share
/// the same data.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    companies: Arc<HashMap<String, Arc<Company>>>,
    index: Arc<[CompanySummary]>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::from_companies(Vec::new())
    }
}

impl InMemoryDirectory {
    /// Build from `(file_name, content)` pairs. Excluded exports are skipped.
    pub fn from_exports<I, N, C>(exports: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        Self::from_companies(
            exports
                .into_iter()
                .filter_map(|(file_name, content)| {
                    import_export(file_name.as_ref(), content.as_ref())
                }),
        )
    }

    /// Build from already mapped companies. A later company replaces an earlier one
    /// with the same id.
    pub fn from_companies<I>(companies: I) -> Self
    where
        I: IntoIterator<Item = Company>,
    {
        let mut by_id: HashMap<String, Arc<Company>> = HashMap::new();
        for company in companies {
            if let Some(previous) = by_id.get(&company.id) {
                tracing::warn!(
                    id = %company.id,
                    replaced = ?previous.file_name,
                    by = ?company.file_name,
                    "Duplicate company id, keeping the later export"
                );
            }
            by_id.insert(company.id.clone(), Arc::new(company));
        }

        let mut index: Vec<CompanySummary> = by_id.values().map(|c| c.summary()).collect();
        sort_by_name(&mut index);

        Self {
            companies: Arc::new(by_id),
            index: index.into(),
        }
    }

    /// Company index, sorted by display name.
    pub fn index(&self) -> &[CompanySummary] {
        &self.index
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.get(id).map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Total admitted clients across all companies.
    pub fn total_clients(&self) -> usize {
        self.index.iter().map(|c| c.total_clients).sum()
    }

    /// Owned copy of a company, or `NotFound`.
    pub fn find(&self, id: &str) -> DirectoryResult<Company> {
        Ok(self.lookup(id)?.as_ref().clone())
    }

    fn lookup(&self, id: &str) -> DirectoryResult<&Arc<Company>> {
        self.companies
            .get(id)
            .ok_or_else(|| DirectoryError::NotFound(format!("Company {} not found", id)))
    }
}

#[async_trait]
impl ClientLoader for InMemoryDirectory {
    async fn load_clients(&self, company: &CompanySummary) -> DirectoryResult<Vec<ClientRecord>> {
        Ok(self.lookup(&company.id)?.clients.clone())
    }
}

#[async_trait]
impl CompanyRepository for InMemoryDirectory {
    async fn snapshot(&self) -> DirectoryResult<Arc<InMemoryDirectory>> {
        Ok(Arc::new(self.clone()))
    }
}
