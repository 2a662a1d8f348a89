//! Narrowing one company's clients by text and by the active flag.

use crate::models::{ClientField, ClientRecord, Company};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which clients to keep according to their active flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActivityFilter {
    pub fn admits(self, client: &ClientRecord) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Active => client.is_active(),
            ActivityFilter::Inactive => !client.is_active(),
        }
    }
}

/// Client filter for a single company.
///
/// A non-empty query must appear, case-insensitively, in at least one of the
/// [`ClientField::FILTERABLE`] fields on its own. Unlike relevance search, fields are not
/// joined, and phone numbers are not looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    needle: String,
    activity: ActivityFilter,
}

impl ClientFilter {
    pub fn new(query: &str, activity: ActivityFilter) -> Self {
        Self {
            needle: query.to_lowercase(),
            activity,
        }
    }

    /// Lower-cased query; empty when the filter does not look at text.
    pub fn query(&self) -> &str {
        &self.needle
    }

    pub fn activity(&self) -> ActivityFilter {
        self.activity
    }

    /// Whether every client passes.
    pub fn is_unrestricted(&self) -> bool {
        self.needle.is_empty() && self.activity == ActivityFilter::All
    }

    pub fn matches(&self, client: &ClientRecord) -> bool {
        self.activity.admits(client) && self.matches_text(client)
    }

    fn matches_text(&self, client: &ClientRecord) -> bool {
        self.needle.is_empty()
            || ClientField::FILTERABLE
                .iter()
                .any(|&field| client.field(field).to_lowercase().contains(&self.needle))
    }

    /// Narrow `company` to the matching clients, in export order.
    pub fn apply(&self, mut company: Company) -> Company {
        if !self.is_unrestricted() {
            company.retain_clients(|client| self.matches(client));
        }
        company
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(nom: &str, fonction: &str, actif: &str) -> ClientRecord {
        ClientRecord {
            nom: nom.to_string(),
            prenom: "Jean".to_string(),
            fonction: fonction.to_string(),
            actif: actif.to_string(),
            telephone: "022 555 00 00".to_string(),
            ..Default::default()
        }
    }

    fn company() -> Company {
        Company::new(
            "acme",
            "Acme",
            None,
            vec![
                client("Dupont", "Directeur", "1 - Oui"),
                client("Martin", "Directrice RH", "0 - Non"),
                client("Keller", "Comptable", "1 - Oui"),
            ],
        )
    }

    fn noms(company: &Company) -> Vec<&str> {
        company.clients.iter().map(|c| c.nom.as_str()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let filter = ClientFilter::default();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(company()), company());
    }

    #[test]
    fn test_query_is_case_insensitive_per_field() {
        let filter = ClientFilter::new("DIRECT", ActivityFilter::All);
        assert_eq!(noms(&filter.apply(company())), vec!["Dupont", "Martin"]);
    }

    #[test]
    fn test_query_does_not_span_fields() {
        // "dupont jean" would match the joined search text but not any single field
        let filter = ClientFilter::new("dupont jean", ActivityFilter::All);
        assert!(filter.apply(company()).clients.is_empty());
    }

    #[test]
    fn test_query_ignores_phone_numbers() {
        let filter = ClientFilter::new("022", ActivityFilter::All);
        assert!(filter.apply(company()).clients.is_empty());
    }

    #[test]
    fn test_activity_filters() {
        let active = ClientFilter::new("", ActivityFilter::Active).apply(company());
        assert_eq!(noms(&active), vec!["Dupont", "Keller"]);

        let inactive = ClientFilter::new("", ActivityFilter::Inactive).apply(company());
        assert_eq!(noms(&inactive), vec!["Martin"]);
        assert_eq!(inactive.total_clients, 3);
        assert_eq!(inactive.active_clients, 2);
    }

    #[test]
    fn test_query_and_activity_combine() {
        let filter = ClientFilter::new("direct", ActivityFilter::Active);
        assert_eq!(noms(&filter.apply(company())), vec!["Dupont"]);
    }

    #[test]
    fn test_activity_deserializes_lowercase() {
        let activity: ActivityFilter = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(activity, ActivityFilter::Inactive);
    }
}
