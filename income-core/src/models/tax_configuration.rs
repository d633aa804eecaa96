use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::or_zero;

/// Percentages entered across the contract and tax steps, possibly incomplete.
///
/// `None` means the field was left blank or held something that is not a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDraft {
    pub contract_share_percent: Option<Decimal>,
    pub social_contribution_rate_percent: Option<Decimal>,
    pub income_tax_rate_percent: Option<Decimal>,
}

impl TaxDraft {
    /// Fills every missing field with zero.
    pub fn resolve(&self) -> TaxConfiguration {
        TaxConfiguration {
            contract_share_percent: or_zero(self.contract_share_percent),
            social_contribution_rate_percent: or_zero(self.social_contribution_rate_percent),
            income_tax_rate_percent: or_zero(self.income_tax_rate_percent),
            vat_rate_percent: Decimal::ZERO,
        }
    }

    pub fn get(
        &self,
        field: TaxField,
    ) -> Option<Decimal> {
        match field {
            TaxField::ContractShare => self.contract_share_percent,
            TaxField::SocialContribution => self.social_contribution_rate_percent,
            TaxField::IncomeTax => self.income_tax_rate_percent,
        }
    }

    pub fn set(
        &mut self,
        field: TaxField,
        value: Option<Decimal>,
    ) {
        let slot = match field {
            TaxField::ContractShare => &mut self.contract_share_percent,
            TaxField::SocialContribution => &mut self.social_contribution_rate_percent,
            TaxField::IncomeTax => &mut self.income_tax_rate_percent,
        };
        *slot = value;
    }
}

/// Names one of the percentage fields of a [`TaxDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxField {
    ContractShare,
    SocialContribution,
    IncomeTax,
}

/// Fully resolved percentages consumed by the calculation engine (0–100 scale).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfiguration {
    pub contract_share_percent: Decimal,
    pub social_contribution_rate_percent: Decimal,
    pub income_tax_rate_percent: Decimal,
    #[serde(default)]
    pub vat_rate_percent: Decimal,
}
