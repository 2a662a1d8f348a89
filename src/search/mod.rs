//! Relevance search over companies and their clients.
//!
//! Company-name matches form the top tier; client-field matches the second. Client
//! collections are loaded lazily through a [`crate::repositories::ClientLoader`].
//! [`ClientFilter`] narrows the clients of a single company.

pub mod client_filter;
pub mod relevance;

pub use client_filter::{ActivityFilter, ClientFilter};
pub use relevance::{
    match_clients, rank, RelevanceSearch, RelevanceTier, SearchOutcome, SearchReport,
    SearchResult, PREVIEW_LIMIT,
};
