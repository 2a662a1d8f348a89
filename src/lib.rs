//! Client Directory - schema-tolerant client export mapping and relevance search.
//!
//! Company exports are semicolon-delimited files whose column order and naming vary.
//! This library normalizes them into uniform client records and ranks companies
//! against a query, either through their name or through their clients.
//!
//! # Architecture
//!
//! - **mapping**: Header detection, positional fallback layouts, row admission, client export
//! - **search**: Two-tier relevance search with lazy client loading, per-company client filters
//! - **models**: Client records and company structures
//! - **repositories**: Client loaders and company sources (directory, in-memory)
//! - **services**: Validation and orchestration for the MCP handlers
//! - **server**: MCP protocol server over stdio
//! - **cache**: TTL cache for parsed exports
//! - **observability**: Search counters and timing
//! - **config**: Configuration from environment variables
//! - **error**: Error types

pub mod cache;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;

pub use cache::TimedCache;
pub use config::Config;
pub use error::{ConfigError, DirectoryError, DirectoryResult};
pub use mapping::{import_export, parse_clients, ClientExport, ColumnMap};
pub use models::{ClientField, ClientRecord, Company, CompanySummary};
pub use observability::SearchMetrics;
pub use repositories::{
    ClientLoader, CompanyRepository, CsvDirectoryRepository, InMemoryDirectory, TimeoutLoader,
};
pub use search::{
    ActivityFilter, ClientFilter, RelevanceSearch, RelevanceTier, SearchOutcome, SearchResult,
};
pub use server::ClientDirectoryServer;
pub use services::{DirectoryService, DirectoryServiceImpl};
