//! Two-tier relevance search across companies and their clients.
//!
//! A company whose display name contains the query ranks above every company that
//! only matches through its clients, whatever the counts. Within a tier, companies
//! with more matches come first; ties keep their input order.

use crate::error::DirectoryResult;
use crate::models::{ClientRecord, CompanySummary};
use crate::repositories::ClientLoader;
use futures::stream::{self, StreamExt};
use serde::{Serialize, Serializer};

/// Maximum number of matching clients returned per company.
pub const PREVIEW_LIMIT: usize = 3;

/// Default number of companies evaluated concurrently.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Coarse rank bucket for a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelevanceTier {
    /// Nothing matched
    NoMatch = 0,
    /// At least one client matched
    ClientMatch = 1,
    /// The company name matched
    CompanyName = 2,
}

impl RelevanceTier {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for RelevanceTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// A company annotated with how well it matched a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub company: CompanySummary,

    /// Matching clients; every client when the company name matched
    #[serde(rename = "matches")]
    pub match_count: usize,

    /// First matching clients in export order, at most [`PREVIEW_LIMIT`]
    pub matched_clients: Vec<ClientRecord>,

    pub relevance: RelevanceTier,
}

impl SearchResult {
    fn company_name_match(company: &CompanySummary) -> Self {
        Self {
            match_count: company.total_clients,
            matched_clients: Vec::new(),
            relevance: RelevanceTier::CompanyName,
            company: company.clone(),
        }
    }

    fn no_match(company: &CompanySummary) -> Self {
        Self {
            company: company.clone(),
            match_count: 0,
            matched_clients: Vec::new(),
            relevance: RelevanceTier::NoMatch,
        }
    }
}

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    /// Empty query: the company index, unranked
    Index(Vec<CompanySummary>),
    /// Ranked companies with at least one match
    Ranked(Vec<SearchResult>),
}

impl SearchOutcome {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, SearchOutcome::Index(_))
    }

    pub fn len(&self) -> usize {
        match self {
            SearchOutcome::Index(companies) => companies.len(),
            SearchOutcome::Ranked(results) => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked results, or `None` for a passthrough.
    pub fn ranked(&self) -> Option<&[SearchResult]> {
        match self {
            SearchOutcome::Ranked(results) => Some(results),
            SearchOutcome::Index(_) => None,
        }
    }
}

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub companies_evaluated: usize,
    pub name_matches: usize,
    pub loads_failed: usize,
    pub clients_scanned: usize,
}

/// Result of evaluating one company.
struct Evaluation {
    result: SearchResult,
    load_failed: bool,
    clients_scanned: usize,
}

/// Relevance search engine.
///
/// Holds no data between calls: the company index and the loader are passed in.
#[derive(Debug, Clone)]
pub struct RelevanceSearch {
    concurrency: usize,
}

impl Default for RelevanceSearch {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl RelevanceSearch {
    /// Create an engine evaluating up to `concurrency` companies at once.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Search `companies`, loading clients through `loader` when the name does not match.
    pub async fn search<L>(
        &self,
        query: &str,
        companies: &[CompanySummary],
        loader: &L,
    ) -> SearchOutcome
    where
        L: ClientLoader + ?Sized,
    {
        self.search_with_report(query, companies, loader).await.0
    }

    /// Same as [`RelevanceSearch::search`], also returning run counters.
    pub async fn search_with_report<L>(
        &self,
        query: &str,
        companies: &[CompanySummary],
        loader: &L,
    ) -> (SearchOutcome, SearchReport)
    where
        L: ClientLoader + ?Sized,
    {
        if is_blank_query(query) {
            return (
                SearchOutcome::Index(companies.to_vec()),
                SearchReport::default(),
            );
        }

        let needle = query.to_lowercase();

        // Futures are built up front so the stream holds no borrowing closure
        let evaluations: Vec<_> = companies
            .iter()
            .map(|company| evaluate(&needle, company, loader))
            .collect();

        // `buffered` yields in input order, which the stable sort relies on
        let evaluations: Vec<Evaluation> = stream::iter(evaluations)
            .buffered(self.concurrency)
            .collect()
            .await;

        finish(evaluations)
    }

    /// Synchronous search for callers holding a blocking loader.
    pub fn search_blocking<F>(
        &self,
        query: &str,
        companies: &[CompanySummary],
        mut loader: F,
    ) -> SearchOutcome
    where
        F: FnMut(&CompanySummary) -> DirectoryResult<Vec<ClientRecord>>,
    {
        if is_blank_query(query) {
            return SearchOutcome::Index(companies.to_vec());
        }

        let needle = query.to_lowercase();
        let evaluations = companies
            .iter()
            .map(|company| {
                if name_matches(&needle, company) {
                    name_evaluation(company)
                } else {
                    evaluate_loaded(&needle, company, loader(company))
                }
            })
            .collect();

        finish(evaluations).0
    }
}

fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

fn name_matches(needle: &str, company: &CompanySummary) -> bool {
    company.name.to_lowercase().contains(needle)
}

fn name_evaluation(company: &CompanySummary) -> Evaluation {
    Evaluation {
        result: SearchResult::company_name_match(company),
        load_failed: false,
        clients_scanned: 0,
    }
}

async fn evaluate<L>(needle: &str, company: &CompanySummary, loader: &L) -> Evaluation
where
    L: ClientLoader + ?Sized,
{
    if name_matches(needle, company) {
        return name_evaluation(company);
    }
    evaluate_loaded(needle, company, loader.load_clients(company).await)
}

fn evaluate_loaded(
    needle: &str,
    company: &CompanySummary,
    loaded: DirectoryResult<Vec<ClientRecord>>,
) -> Evaluation {
    match loaded {
        Ok(clients) => Evaluation {
            clients_scanned: clients.len(),
            result: match_clients(needle, company, &clients),
            load_failed: false,
        },
        Err(e) => {
            tracing::warn!(
                company = %company.id,
                error = %e,
                "Failed to load clients, counting company as unmatched"
            );
            Evaluation {
                result: SearchResult::no_match(company),
                load_failed: true,
                clients_scanned: 0,
            }
        }
    }
}

/// Match a lower-cased query against every client of a company.
pub fn match_clients(
    needle: &str,
    company: &CompanySummary,
    clients: &[ClientRecord],
) -> SearchResult {
    let mut match_count = 0;
    let mut matched_clients = Vec::new();

    for client in clients {
        if client.searchable_text().contains(needle) {
            match_count += 1;
            if matched_clients.len() < PREVIEW_LIMIT {
                matched_clients.push(client.clone());
            }
        }
    }

    let relevance = if match_count > 0 {
        RelevanceTier::ClientMatch
    } else {
        RelevanceTier::NoMatch
    };

    SearchResult {
        company: company.clone(),
        match_count,
        matched_clients,
        relevance,
    }
}

/// Drop unmatched companies and order the rest by tier, then match count.
pub fn rank(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut ranked: Vec<SearchResult> = results
        .into_iter()
        .filter(|result| result.match_count > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| b.match_count.cmp(&a.match_count))
    });

    ranked
}

fn finish(evaluations: Vec<Evaluation>) -> (SearchOutcome, SearchReport) {
    let mut report = SearchReport {
        companies_evaluated: evaluations.len(),
        ..Default::default()
    };

    let results: Vec<SearchResult> = evaluations
        .into_iter()
        .map(|evaluation| {
            if evaluation.result.relevance == RelevanceTier::CompanyName {
                report.name_matches += 1;
            }
            if evaluation.load_failed {
                report.loads_failed += 1;
            }
            report.clients_scanned += evaluation.clients_scanned;
            evaluation.result
        })
        .collect();

    (SearchOutcome::Ranked(rank(results)), report)
}
