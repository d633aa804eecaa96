//! Batch calculation from fixture files, the way `dental-income calc` runs it.

use std::path::{Path, PathBuf};

use income_core::{Wizard, WizardStep};
use income_ui::config::AppConfig;
use income_ui::csv_loader;
use income_ui::report::ResultsReport;
use income_ui::session::SessionFile;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn reference_session_file_reports_net_income() {
    let session = SessionFile::from_file(&fixture_path("reference_session.toml")).unwrap();
    let mut wizard = Wizard::new();

    let result = session.replay(&mut wizard).unwrap();

    assert_eq!(wizard.step(), WizardStep::Results);
    assert_eq!(result.net_income, dec!(26.80));
    assert!(
        ResultsReport(&result)
            .to_string()
            .contains("Profit margin:          26,80 %")
    );
}

#[test]
fn csv_rows_and_config_defaults_without_session() {
    let config = AppConfig::load(Some(&fixture_path("config.toml"))).unwrap();
    let mut wizard = Wizard::new().with_tax_defaults(config.defaults.to_tax_draft());
    wizard.import_procedures(
        csv_loader::load_procedures_from_file(&fixture_path("procedures.csv")).unwrap(),
    );
    wizard.import_additional_costs(
        csv_loader::load_costs_from_file(&fixture_path("costs.csv")).unwrap(),
    );

    let result = SessionFile::default().replay(&mut wizard).unwrap();

    // 285.50 gross, 40 % share = 114.20; 21.4 % + 14.5 % = 35.9 % of that = 40.9978
    assert_eq!(result.gross_income, dec!(285.50));
    assert_eq!(result.contract_income, dec!(114.20));
    assert_eq!(result.social_contributions_amount + result.tax_amount, dec!(40.9978));
    assert_eq!(result.net_income, dec!(10.7022));
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.stdout);
}
