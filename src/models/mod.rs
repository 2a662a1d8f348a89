//! Data models for companies and their clients.
//!
//! This module contains the normalized client record produced by the export mapper
//! and the company structures the search engine ranks.

pub mod client;
pub mod company;

pub use client::{ClientField, ClientRecord, ACTIVE_MARKER};
pub use company::{sort_by_name, Company, CompanySummary};
