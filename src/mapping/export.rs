//! Comma-delimited export of a company's clients.
//!
//! The header row is written bare; every data cell is quoted, empty cells included.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{ClientField, ClientRecord};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

/// Column titles of an exported client list.
pub const EXPORT_HEADERS: [&str; 8] = [
    "No",
    "Nombre",
    "Apellido",
    "Activo",
    "Función",
    "Teléfono",
    "Móvil",
    "Email",
];

/// Field written under each of [`EXPORT_HEADERS`].
const EXPORT_FIELDS: [ClientField; 8] = [
    ClientField::No,
    ClientField::Nom,
    ClientField::Prenom,
    ClientField::Actif,
    ClientField::Fonction,
    ClientField::Telephone,
    ClientField::TelPortable,
    ClientField::Email,
];

/// A rendered client list ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientExport {
    /// Suggested file name
    pub file_name: String,
    pub row_count: usize,
    pub content: String,
}

impl ClientExport {
    /// Render `clients` of the company named `company_name`.
    pub fn render(company_name: &str, clients: &[ClientRecord]) -> DirectoryResult<Self> {
        Ok(Self {
            file_name: export_file_name(company_name),
            row_count: clients.len(),
            content: write_clients_csv(clients)?,
        })
    }
}

/// File name offered for a company's export.
pub fn export_file_name(company_name: &str) -> String {
    format!("{}_clientes.csv", company_name)
}

/// Write `clients` as comma-delimited text under [`EXPORT_HEADERS`].
pub fn write_clients_csv(clients: &[ClientRecord]) -> DirectoryResult<String> {
    let mut header = WriterBuilder::new().from_writer(Vec::new());
    header.write_record(EXPORT_HEADERS).map_err(export_error)?;
    let buffer = header.into_inner().map_err(export_error)?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buffer);
    for client in clients {
        rows.write_record(EXPORT_FIELDS.iter().map(|&field| client.field(field)))
            .map_err(export_error)?;
    }
    let bytes = rows.into_inner().map_err(export_error)?;

    String::from_utf8(bytes).map_err(export_error)
}

fn export_error(e: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::Other(format!("Client export failed: {}", e))
}
