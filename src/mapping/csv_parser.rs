//! Semicolon-delimited export parsing into client records.
//!
//! Parsing never fails: unreadable or header-only input yields no records, short rows
//! and rows without a name are skipped.

use super::columns::ColumnMap;
use crate::models::ClientRecord;
use csv::{ReaderBuilder, StringRecord};

/// Field delimiter used by every client export.
pub const DELIMITER: u8 = b';';

/// Rows with fewer cells than this cannot describe a client.
pub const MIN_ROW_CELLS: usize = 3;

/// Result of mapping one export: the column map used and the admitted records.
#[derive(Debug, Clone)]
pub struct MappedExport {
    pub columns: ColumnMap,
    pub clients: Vec<ClientRecord>,
    /// Data rows that were not admitted
    pub skipped_rows: usize,
}

/// Parse an export into client records.
pub fn parse_clients(content: &str) -> Vec<ClientRecord> {
    map_export(content).clients
}

/// Parse an export, keeping the column map and skip count alongside the records.
pub fn map_export(content: &str) -> MappedExport {
    let rows = read_rows(content);

    let Some((header, data)) = rows.split_first() else {
        return MappedExport {
            columns: ColumnMap::empty(),
            clients: Vec::new(),
            skipped_rows: 0,
        };
    };

    let header: Vec<&str> = header.iter().collect();
    let columns = ColumnMap::from_header(&header);

    let mut clients = Vec::with_capacity(data.len());
    let mut skipped_rows = 0;

    for row in data {
        match map_row(&columns, row) {
            Some(client) => clients.push(client),
            None => skipped_rows += 1,
        }
    }

    MappedExport {
        columns,
        clients,
        skipped_rows,
    }
}

/// Build a record from one data row, or `None` if the row is not admitted.
pub fn map_row(columns: &ColumnMap, row: &StringRecord) -> Option<ClientRecord> {
    if row.len() < MIN_ROW_CELLS {
        return None;
    }

    let cells: Vec<&str> = row.iter().collect();
    let client = ClientRecord::from_fields(|field| columns.value(field, &cells).to_string());

    client.has_name().then_some(client)
}

/// Split content into non-blank rows. Unparseable records are dropped.
fn read_rows(content: &str) -> Vec<StringRecord> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true) // exports are ragged
        .from_reader(content.as_bytes());

    reader
        .records()
        .filter_map(Result::ok)
        .filter(|record| !is_blank(record))
        .collect()
}

fn is_blank(record: &StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}
