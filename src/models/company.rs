//! Company models: the index entry and the fully loaded company.

use super::client::ClientRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Index entry for a company, without its clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    /// Stable identifier derived from the display name
    pub id: String,

    /// Display name
    pub name: String,

    /// Export file the company was read from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Number of admitted client records
    pub total_clients: usize,
}

/// A company with its clients loaded.
///
/// `total_clients` and `active_clients` always describe the whole company, also when
/// `clients` has been narrowed by [`Company::retain_clients`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub clients: Vec<ClientRecord>,
    pub total_clients: usize,
    #[serde(default)]
    pub active_clients: usize,
}

impl Company {
    /// Create a company, deriving the client count from `clients`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        file_name: Option<String>,
        clients: Vec<ClientRecord>,
    ) -> Self {
        let total_clients = clients.len();
        let active_clients = clients.iter().filter(|c| c.is_active()).count();
        Self {
            id: id.into(),
            name: name.into(),
            file_name,
            clients,
            total_clients,
            active_clients,
        }
    }

    /// Keep only the clients `keep` accepts, leaving the company-wide counts as they are.
    pub fn retain_clients<F>(&mut self, keep: F)
    where
        F: FnMut(&ClientRecord) -> bool,
    {
        self.clients.retain(keep);
    }

    /// Index entry for this company.
    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            file_name: self.file_name.clone(),
            total_clients: self.total_clients,
        }
    }
}

impl CompanySummary {
    /// Case-insensitive display-name ordering, falling back to the raw name.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sort an index by display name.
pub fn sort_by_name(companies: &mut [CompanySummary]) {
    companies.sort_by(CompanySummary::cmp_by_name);
}
