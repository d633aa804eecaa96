//! CSV import of procedure and additional-cost rows.
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive. Whitespace around values is trimmed.
//!
//! ## Procedures
//!
//! | Column | Required | Type | Notes |
//! |---------------|----------|---------|--------------------------|
//! | `name` | yes | string | May be empty |
//! | `gross_value` | yes | decimal | Billed value, e.g. `80.00` |
//!
//! ```csv
//! name,gross_value
//! Cleaning,45.00
//! Root canal,180.00
//! ```
//!
//! ## Additional costs
//!
//! | Column | Required | Type | Notes |
//! |---------------|----------|---------|--------------------------------------|
//! | `description` | yes | string | |
//! | `amount` | yes | decimal | |
//! | `kind` | no | string | `material` (default) or `flat` |
//!
//! ```csv
//! description,amount,kind
//! Gloves,12.50,material
//! Travel,20.00,flat
//! ```
use std::path::Path;

use income_core::models::{AdditionalCostEntry, CostKind, ProcedureEntry};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProcedureRow {
    name: String,
    gross_value: Decimal,
}

#[derive(Debug, Deserialize)]
struct CostRow {
    description: String,
    amount: Decimal,
    kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `kind` cell held something other than a known cost kind.
    /// `row` is 1-based (header = row 0).
    #[error("unrecognised cost kind '{kind}' on row {row}")]
    InvalidCostKind { kind: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn read_rows<T: DeserializeOwned>(input: &str) -> impl Iterator<Item = (usize, Result<T, csv::Error>)> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(std::io::Cursor::new(input.to_owned()));

    reader
        .into_deserialize::<T>()
        .enumerate()
        .map(|(idx, row)| (idx + 1, row))
}

fn convert_cost(
    row: CostRow,
    row_number: usize,
) -> Result<AdditionalCostEntry, CsvLoadError> {
    let kind = match row.kind.as_deref() {
        None | Some("") => CostKind::default(),
        Some(text) => text
            .parse::<CostKind>()
            .map_err(|_| CsvLoadError::InvalidCostKind {
                kind: text.to_string(),
                row: row_number,
            })?,
    };
    Ok(AdditionalCostEntry::new(row.description, row.amount, kind))
}

/// Parse procedure CSV text. Rows are returned in file order.
pub fn load_procedures_from_str(input: &str) -> Result<Vec<ProcedureEntry>, CsvLoadError> {
    read_rows::<ProcedureRow>(input)
        .map(|(_, row)| {
            let row = row?;
            Ok::<_, CsvLoadError>(ProcedureEntry::new(row.name, row.gross_value))
        })
        .collect()
}

/// Parse additional-cost CSV text. Rows are returned in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – structurally invalid CSV or a bad amount.
/// * [CsvLoadError::InvalidCostKind] – an unknown `kind` value.
pub fn load_costs_from_str(input: &str) -> Result<Vec<AdditionalCostEntry>, CsvLoadError> {
    read_rows::<CostRow>(input)
        .map(|(row_number, row)| convert_cost(row?, row_number))
        .collect()
}

/// Read a procedure file from disk and delegate to [load_procedures_from_str].
pub fn load_procedures_from_file(path: &Path) -> Result<Vec<ProcedureEntry>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_procedures_from_str(&contents)
}

/// Read a cost file from disk and delegate to [load_costs_from_str].
pub fn load_costs_from_file(path: &Path) -> Result<Vec<AdditionalCostEntry>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_costs_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
