use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CostKind;

/// Currency every calculation is expressed in.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// One extra expense as it appears on the results report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCostItem {
    pub description: String,
    pub amount: Decimal,
    pub kind: CostKind,
}

/// Figures derived from one submission of the wizard.
///
/// Values are unrounded; rounding happens when they are displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Sum of every procedure's gross value.
    pub gross_income: Decimal,
    /// Contract share applied to produce `contract_income`.
    pub contract_share_percent: Decimal,
    /// Portion of the gross income the professional keeps.
    pub contract_income: Decimal,
    pub social_contributions_amount: Decimal,
    pub tax_amount: Decimal,
    /// Informational only; never subtracted from net income.
    pub vat_amount: Decimal,
    pub additional_costs_total: Decimal,
    /// May be negative when costs exceed what remains of contract income.
    pub net_income: Decimal,
    /// Everything between gross and net: the clinic's share, contributions,
    /// tax and additional costs.
    pub total_expenses: Decimal,
    /// Net income as a percentage of gross income; zero when there is no gross income.
    pub profit_margin: Decimal,
    pub currency: String,
    pub additional_cost_items: Vec<AdditionalCostItem>,
}

impl CalculationResult {
    /// Sum of the additional cost items of one kind, saturating at the
    /// bounds of [`Decimal`].
    pub fn costs_by_kind(
        &self,
        kind: CostKind,
    ) -> Decimal {
        self.additional_cost_items
            .iter()
            .filter(|item| item.kind == kind)
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.amount))
    }
}
