//! Net income calculation for self-employed dental professionals.
//!
//! Turns the billed procedures, the clinic contract share, the social
//! contribution and income tax rates, and any additional costs into a
//! [`CalculationResult`].
//!
//! # Calculation Structure
//!
//! | Figure | Derivation |
//! |--------|------------|
//! | Gross income | Sum of procedure gross values |
//! | Contract income | Gross income × contract share % |
//! | Social contributions | Contract income × social contribution rate % |
//! | Income tax | Contract income × income tax rate % |
//! | Additional costs | Sum of additional cost amounts |
//! | Net income | Contract income − contributions − tax − additional costs |
//! | Total expenses | (Gross − contract income) + contributions + tax + additional costs |
//! | Profit margin | Net income ÷ gross income × 100 (zero without gross income) |
//!
//! VAT is computed on contract income for reference but is never deducted.
//!
//! Every figure is computed with checked arithmetic. Inputs whose figures do
//! not fit in a [`Decimal`] produce a [`CalculationError`] instead of a panic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use income_core::calculations::compute;
//! use income_core::models::{ProcedureEntry, TaxConfiguration};
//!
//! let procedures = vec![ProcedureEntry::new("Root canal", dec!(100))];
//! let tax = TaxConfiguration {
//!     contract_share_percent: dec!(50),
//!     social_contribution_rate_percent: dec!(21.4),
//!     income_tax_rate_percent: dec!(25),
//!     vat_rate_percent: dec!(0),
//! };
//!
//! let result = compute(&procedures, &[], &tax).unwrap();
//!
//! assert_eq!(result.contract_income, dec!(50));
//! assert_eq!(result.net_income, dec!(26.80));
//! assert_eq!(result.profit_margin, dec!(26.8));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{checked_sum, percent_of, share_of};
use crate::models::{
    AdditionalCostEntry, AdditionalCostItem, CalculationResult, DEFAULT_CURRENCY, ProcedureEntry,
    TaxConfiguration,
};

/// A figure fell outside the range a [`Decimal`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{figure} is too large to calculate")]
pub struct CalculationError {
    /// Name of the figure that overflowed, e.g. `"gross income"`.
    pub figure: &'static str,
}

fn within_range(
    value: Option<Decimal>,
    figure: &'static str,
) -> Result<Decimal, CalculationError> {
    value.ok_or(CalculationError { figure })
}

/// Settings that do not come from the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCalculatorConfig {
    /// ISO 4217 code stamped on every result.
    pub currency: String,

    /// VAT rate applied to contract income for reference, on a 0–100 scale.
    ///
    /// Used only when the [`TaxConfiguration`] passed to
    /// [`IncomeCalculator::calculate`] carries no VAT rate of its own.
    pub vat_rate_percent: Decimal,
}

impl Default for IncomeCalculatorConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            vat_rate_percent: Decimal::ZERO,
        }
    }
}

/// Calculator for net income from billed procedures.
///
/// Stateless apart from its configuration; every call to
/// [`calculate`](Self::calculate) is deterministic and side-effect free.
#[derive(Debug, Clone, Default)]
pub struct IncomeCalculator {
    config: IncomeCalculatorConfig,
}

impl IncomeCalculator {
    pub fn new(config: IncomeCalculatorConfig) -> Self {
        Self { config }
    }

    /// Derives the full result record from the collected inputs.
    ///
    /// Negative net income is returned as-is. Profit margin is zero whenever
    /// gross income is zero.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] when any figure overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use income_core::calculations::IncomeCalculator;
    /// use income_core::models::{AdditionalCostEntry, CostKind, ProcedureEntry, TaxConfiguration};
    ///
    /// let calculator = IncomeCalculator::default();
    /// let procedures = vec![ProcedureEntry::new("Crown", dec!(100))];
    /// let costs = vec![AdditionalCostEntry::new("Lab work", dec!(30), CostKind::Material)];
    /// let tax = TaxConfiguration {
    ///     contract_share_percent: dec!(50),
    ///     social_contribution_rate_percent: dec!(21.4),
    ///     income_tax_rate_percent: dec!(25),
    ///     vat_rate_percent: dec!(0),
    /// };
    ///
    /// let result = calculator.calculate(&procedures, &costs, &tax).unwrap();
    ///
    /// assert_eq!(result.net_income, dec!(-3.20));
    /// ```
    pub fn calculate(
        &self,
        procedures: &[ProcedureEntry],
        additional_costs: &[AdditionalCostEntry],
        tax: &TaxConfiguration,
    ) -> Result<CalculationResult, CalculationError> {
        let gross_income = self.gross_income(procedures)?;
        let contract_income = self.contract_income(gross_income, tax.contract_share_percent)?;
        let social_contributions_amount = within_range(
            percent_of(contract_income, tax.social_contribution_rate_percent),
            "social contributions",
        )?;
        let tax_amount = within_range(
            percent_of(contract_income, tax.income_tax_rate_percent),
            "income tax",
        )?;
        let vat_amount = within_range(percent_of(contract_income, self.vat_rate(tax)), "VAT")?;
        let additional_costs_total = self.additional_costs_total(additional_costs)?;

        let deductions = within_range(
            social_contributions_amount.checked_add(tax_amount),
            "deductions",
        )?;
        let net_income = self.net_income(contract_income, deductions, additional_costs_total)?;
        let total_expenses = self.total_expenses(
            gross_income,
            contract_income,
            deductions,
            additional_costs_total,
        )?;
        let profit_margin = within_range(share_of(net_income, gross_income), "profit margin")?;

        debug!(
            gross = %gross_income,
            contract = %contract_income,
            net = %net_income,
            "income calculated"
        );

        Ok(CalculationResult {
            gross_income,
            contract_share_percent: tax.contract_share_percent,
            contract_income,
            social_contributions_amount,
            tax_amount,
            vat_amount,
            additional_costs_total,
            net_income,
            total_expenses,
            profit_margin,
            currency: self.config.currency.clone(),
            additional_cost_items: additional_costs
                .iter()
                .map(|cost| AdditionalCostItem {
                    description: cost.description.clone(),
                    amount: cost.amount,
                    kind: cost.kind,
                })
                .collect(),
        })
    }

    fn gross_income(
        &self,
        procedures: &[ProcedureEntry],
    ) -> Result<Decimal, CalculationError> {
        within_range(
            checked_sum(procedures.iter().map(|p| p.gross_value)),
            "gross income",
        )
    }

    fn contract_income(
        &self,
        gross_income: Decimal,
        contract_share_percent: Decimal,
    ) -> Result<Decimal, CalculationError> {
        within_range(
            percent_of(gross_income, contract_share_percent),
            "contract income",
        )
    }

    fn vat_rate(
        &self,
        tax: &TaxConfiguration,
    ) -> Decimal {
        if tax.vat_rate_percent.is_zero() {
            self.config.vat_rate_percent
        } else {
            tax.vat_rate_percent
        }
    }

    fn additional_costs_total(
        &self,
        additional_costs: &[AdditionalCostEntry],
    ) -> Result<Decimal, CalculationError> {
        within_range(
            checked_sum(additional_costs.iter().map(|c| c.amount)),
            "additional costs",
        )
    }

    fn net_income(
        &self,
        contract_income: Decimal,
        deductions: Decimal,
        additional_costs_total: Decimal,
    ) -> Result<Decimal, CalculationError> {
        within_range(
            contract_income
                .checked_sub(deductions)
                .and_then(|rest| rest.checked_sub(additional_costs_total)),
            "net income",
        )
    }

    fn total_expenses(
        &self,
        gross_income: Decimal,
        contract_income: Decimal,
        deductions: Decimal,
        additional_costs_total: Decimal,
    ) -> Result<Decimal, CalculationError> {
        within_range(
            gross_income
                .checked_sub(contract_income)
                .and_then(|clinic_share| clinic_share.checked_add(deductions))
                .and_then(|subtotal| subtotal.checked_add(additional_costs_total)),
            "total expenses",
        )
    }
}

/// Runs the default calculator (EUR, no VAT).
pub fn compute(
    procedures: &[ProcedureEntry],
    additional_costs: &[AdditionalCostEntry],
    tax: &TaxConfiguration,
) -> Result<CalculationResult, CalculationError> {
    IncomeCalculator::default().calculate(procedures, additional_costs, tax)
}
