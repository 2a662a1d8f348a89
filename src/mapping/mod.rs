//! Schema-tolerant mapping of client exports into normalized records.
//!
//! - **columns**: header classification rules and positional fallback layouts
//! - **csv_parser**: semicolon-delimited parsing and row admission
//! - **company_name**: company names and identifiers from export file names
//! - **export**: comma-delimited export of a client list

pub mod columns;
pub mod company_name;
pub mod csv_parser;
pub mod export;

pub use columns::{classify_header, clean_token, ColumnMap, ColumnSource};
pub use company_name::{company_id, company_name_from_file_name};
pub use csv_parser::{map_export, parse_clients, MappedExport};
pub use export::{write_clients_csv, ClientExport, EXPORT_HEADERS};

use crate::models::Company;

/// Turn one export file into a company, or `None` if the file is excluded.
///
/// No file I/O happens here; callers pass the file name and its decoded text.
pub fn import_export(file_name: &str, content: &str) -> Option<Company> {
    let name = company_name_from_file_name(file_name)?;
    let mapped = map_export(content);

    tracing::debug!(
        file = %file_name,
        columns = ?mapped.columns.source(),
        mapped_fields = mapped.columns.mapped_count(),
        clients = mapped.clients.len(),
        skipped = mapped.skipped_rows,
        "Mapped client export"
    );

    Some(Company::new(
        company_id(&name),
        name,
        Some(file_name.to_string()),
        mapped.clients,
    ))
}
