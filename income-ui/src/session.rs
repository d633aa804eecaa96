//! Batch sessions: a TOML description of one wizard run.
//!
//! ```toml
//! contract_share_percent = "50"
//! social_contribution_rate_percent = "21.4"
//! income_tax_rate_percent = "25"
//!
//! [[procedures]]
//! name = "Root canal"
//! gross_value = "100"
//!
//! [[additional_costs]]
//! description = "Gloves"
//! amount = "30"
//! kind = "material"
//! ```
//!
//! Replaying a session walks the wizard step by step, so the same gates
//! apply as in the interactive shell.

use std::path::{Path, PathBuf};

use income_core::models::{
    AdditionalCostEntry, CalculationResult, CostKind, ProcedureEntry, TaxField,
};
use income_core::{Wizard, WizardError, WizardStep};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot read session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid session file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The wizard refused to leave `step`.
    #[error("step {step}: {source}")]
    Refused {
        step: WizardStep,
        #[source]
        source: WizardError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProcedure {
    #[serde(default)]
    pub name: String,
    pub gross_value: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCost {
    #[serde(default)]
    pub description: String,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub kind: CostKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub procedures: Vec<SessionProcedure>,
    pub additional_costs: Vec<SessionCost>,
    pub contract_share_percent: Option<Decimal>,
    pub social_contribution_rate_percent: Option<Decimal>,
    pub income_tax_rate_percent: Option<Decimal>,
}

impl SessionFile {
    pub fn from_toml_str(input: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Drives `wizard` through all four input steps and submits.
    ///
    /// Percentages left out of the session keep whatever the wizard already
    /// holds (for example configured defaults).
    pub fn replay(
        &self,
        wizard: &mut Wizard,
    ) -> Result<CalculationResult, SessionError> {
        wizard.import_procedures(self.procedures.iter().map(|p| {
            ProcedureEntry::new(p.name.clone(), p.gross_value.unwrap_or(Decimal::ZERO))
        }));
        step(wizard)?;

        self.apply(wizard, TaxField::ContractShare, self.contract_share_percent);
        step(wizard)?;

        wizard.import_additional_costs(self.additional_costs.iter().map(|c| {
            AdditionalCostEntry::new(
                c.description.clone(),
                c.amount.unwrap_or(Decimal::ZERO),
                c.kind,
            )
        }));
        step(wizard)?;

        self.apply(
            wizard,
            TaxField::SocialContribution,
            self.social_contribution_rate_percent,
        );
        self.apply(wizard, TaxField::IncomeTax, self.income_tax_rate_percent);

        let at = wizard.step();
        let result = wizard
            .submit()
            .map_err(|source| SessionError::Refused { step: at, source })?;
        Ok(result.clone())
    }

    fn apply(
        &self,
        wizard: &mut Wizard,
        field: TaxField,
        value: Option<Decimal>,
    ) {
        if value.is_some() {
            wizard.set_tax_field(field, value);
        }
    }
}

fn step(wizard: &mut Wizard) -> Result<WizardStep, SessionError> {
    let at = wizard.step();
    let next = wizard
        .advance()
        .map_err(|source| SessionError::Refused { step: at, source })?;
    debug!(from = %at, to = %next, "session step");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const REFERENCE: &str = r#"
contract_share_percent = "50"
social_contribution_rate_percent = "21.4"
income_tax_rate_percent = "25"

[[procedures]]
name = "Root canal"
gross_value = "100"
"#;

    #[test]
    fn replay_reference_session() {
        let session = SessionFile::from_toml_str(REFERENCE).unwrap();
        let mut wizard = Wizard::new();

        let result = session.replay(&mut wizard).unwrap();

        assert_eq!(result.net_income, dec!(26.80));
        assert_eq!(wizard.step(), WizardStep::Results);
        assert_eq!(wizard.procedures().len(), 1);
    }

    #[test]
    fn replay_with_costs_of_both_kinds() {
        let input = format!(
            "{REFERENCE}\n[[additional_costs]]\ndescription = \"Gloves\"\namount = \"20\"\n\n[[additional_costs]]\ndescription = \"Lunch\"\namount = \"10\"\nkind = \"flat\"\n"
        );
        let session = SessionFile::from_toml_str(&input).unwrap();

        let result = session.replay(&mut Wizard::new()).unwrap();

        assert_eq!(result.net_income, dec!(-3.20));
        assert_eq!(result.costs_by_kind(CostKind::Flat), dec!(10));
        assert_eq!(result.costs_by_kind(CostKind::Material), dec!(20));
    }

    #[test]
    fn replay_without_qualifying_procedure_is_refused_at_step_one() {
        let session = SessionFile::from_toml_str("contract_share_percent = \"50\"").unwrap();

        let err = session.replay(&mut Wizard::new()).unwrap_err();

        match err {
            SessionError::Refused { step, source } => {
                assert_eq!(step, WizardStep::Procedures);
                assert_eq!(source, WizardError::NoQualifyingProcedure);
            }
            other => panic!("expected Refused, got {other:?}"),
        }
    }

    #[test]
    fn replay_without_contract_share_is_refused_at_step_two() {
        let session = SessionFile::from_toml_str(
            "[[procedures]]\nname = \"Cleaning\"\ngross_value = \"45\"\n",
        )
        .unwrap();

        let err = session.replay(&mut Wizard::new()).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Refused {
                step: WizardStep::ContractShare,
                ..
            }
        ));
    }

    #[test]
    fn replay_keeps_wizard_defaults_for_missing_rates() {
        let session = SessionFile::from_toml_str(
            "contract_share_percent = \"50\"\n[[procedures]]\ngross_value = \"100\"\n",
        )
        .unwrap();
        let mut wizard = Wizard::new().with_tax_defaults(income_core::models::TaxDraft {
            social_contribution_rate_percent: Some(dec!(21.4)),
            income_tax_rate_percent: Some(dec!(25)),
            ..Default::default()
        });

        let result = session.replay(&mut wizard).unwrap();

        assert_eq!(result.net_income, dec!(26.80));
    }

    #[test]
    fn unknown_cost_kind_is_a_parse_error() {
        let input = "[[additional_costs]]\ndescription = \"Rent\"\namount = \"1\"\nkind = \"office\"\n";

        assert!(matches!(
            SessionFile::from_toml_str(input),
            Err(SessionError::Parse(_))
        ));
    }
}
