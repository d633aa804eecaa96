//! Integration tests that exercise the loaders against on-disk fixture files.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying that the full read-from-disk path
//! works end-to-end.

use std::path::{Path, PathBuf};

use income_core::models::CostKind;
use income_ui::csv_loader::{self, CsvLoadError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_procedure_fixture() {
    let procedures = csv_loader::load_procedures_from_file(&fixture_path("procedures.csv"))
        .expect("fixture file should load without error");

    assert_eq!(procedures.len(), 3);
    assert_eq!(procedures[0].name, "Cleaning");
    assert_eq!(procedures[2].gross_value, dec!(60.50));
}

#[test]
fn test_load_cost_fixture() {
    let costs = csv_loader::load_costs_from_file(&fixture_path("costs.csv")).unwrap();

    assert_eq!(costs.len(), 3);
    assert_eq!(costs[1].description, "Impression material");
    assert_eq!(costs[2].kind, CostKind::Flat);
    assert_eq!(costs.iter().map(|c| c.amount).sum::<rust_decimal::Decimal>(), dec!(62.50));
}

#[test]
fn test_load_nonexistent_file_returns_io_error() {
    let result = csv_loader::load_procedures_from_file(Path::new("/this/path/does/not/exist.csv"));

    assert!(matches!(result, Err(CsvLoadError::Io(_))));
}
