//! Wizard controller for the guided income calculator.
//!
//! Owns the current step, the procedure and additional-cost rows, the draft
//! percentages and the last calculation result. Navigation is gated in two
//! places only: leaving the procedures step needs a billed value of at least
//! 1, and leaving the contract step needs a contract percentage between 0 and
//! 100. Every other range problem is reported by [`Wizard::field_errors`]
//! without blocking, except at submission where the percentages and the
//! upper bound on amounts are checked.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use income_core::models::{ProcedureEdit, TaxField};
//! use income_core::wizard::{Wizard, WizardStep};
//!
//! let mut wizard = Wizard::new();
//! let id = wizard.procedures()[0].id;
//! wizard.edit_procedure(id, ProcedureEdit::GrossValue(Some(dec!(100)))).unwrap();
//! wizard.advance().unwrap();
//!
//! wizard.set_tax_field(TaxField::ContractShare, Some(dec!(50)));
//! wizard.advance().unwrap();
//! wizard.advance().unwrap();
//!
//! wizard.set_tax_field(TaxField::SocialContribution, Some(dec!(21.4)));
//! wizard.set_tax_field(TaxField::IncomeTax, Some(dec!(25)));
//! let result = wizard.submit().unwrap();
//!
//! assert_eq!(result.net_income, dec!(26.80));
//! assert_eq!(wizard.step(), WizardStep::Results);
//! ```

mod error;
mod step;

pub use error::WizardError;
pub use step::WizardStep;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculations::IncomeCalculator;
use crate::models::{
    AdditionalCostEntry, CalculationResult, CostEdit, EntryId, ProcedureEdit, ProcedureEntry,
    TaxDraft, TaxField,
};
use crate::validation::{Field, FieldError, Violation, validate_field};

const TAX_FIELDS: [TaxField; 3] = [
    TaxField::ContractShare,
    TaxField::SocialContribution,
    TaxField::IncomeTax,
];

/// Where a field-level problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    Procedure(EntryId),
    /// 0-based position in the additional cost list.
    Cost(usize),
    Tax(TaxField),
}

impl FieldLocation {
    /// The step on which the field is edited.
    pub fn step(&self) -> WizardStep {
        match self {
            FieldLocation::Procedure(_) => WizardStep::Procedures,
            FieldLocation::Cost(_) => WizardStep::AdditionalCosts,
            FieldLocation::Tax(TaxField::ContractShare) => WizardStep::ContractShare,
            FieldLocation::Tax(TaxField::SocialContribution | TaxField::IncomeTax) => {
                WizardStep::TaxRates
            }
        }
    }
}

/// A non-blocking field-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub location: FieldLocation,
    pub error: FieldError,
}

/// In-memory state of one calculator session.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    procedures: Vec<ProcedureEntry>,
    additional_costs: Vec<AdditionalCostEntry>,
    tax: TaxDraft,
    gate_error: Option<WizardError>,
    result: Option<CalculationResult>,
    calculator: IncomeCalculator,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A fresh session: step 1, one blank procedure, no costs, no percentages.
    pub fn new() -> Self {
        Self::with_calculator(IncomeCalculator::default())
    }

    pub fn with_calculator(calculator: IncomeCalculator) -> Self {
        Self {
            step: WizardStep::Procedures,
            procedures: vec![ProcedureEntry::empty()],
            additional_costs: Vec::new(),
            tax: TaxDraft::default(),
            gate_error: None,
            result: None,
            calculator,
        }
    }

    /// Prefills the percentages with suggested values.
    pub fn with_tax_defaults(
        mut self,
        defaults: TaxDraft,
    ) -> Self {
        self.tax = defaults;
        self
    }

    // ─── accessors ───────────────────────────────────────────────────────────

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn procedures(&self) -> &[ProcedureEntry] {
        &self.procedures
    }

    pub fn additional_costs(&self) -> &[AdditionalCostEntry] {
        &self.additional_costs
    }

    pub fn tax_draft(&self) -> &TaxDraft {
        &self.tax
    }

    /// The message that last blocked navigation, if still relevant.
    pub fn validation_error(&self) -> Option<String> {
        self.gate_error.as_ref().map(ToString::to_string)
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// Running total of the procedure values.
    pub fn procedures_total(&self) -> Decimal {
        self.procedures.iter().map(|p| p.gross_value).sum()
    }

    /// Running total of the additional costs.
    pub fn additional_costs_total(&self) -> Decimal {
        self.additional_costs.iter().map(|c| c.amount).sum()
    }

    // ─── procedures ──────────────────────────────────────────────────────────

    /// Appends a blank procedure row and returns its id.
    pub fn add_procedure(&mut self) -> EntryId {
        let entry = ProcedureEntry::empty();
        let id = entry.id;
        self.procedures.push(entry);
        debug!(%id, count = self.procedures.len(), "procedure added");
        id
    }

    /// Removes a procedure row. The last remaining row cannot be removed.
    pub fn remove_procedure(
        &mut self,
        id: EntryId,
    ) -> Result<ProcedureEntry, WizardError> {
        let position = self.procedure_position(id)?;
        if self.procedures.len() <= 1 {
            return Err(WizardError::LastProcedure);
        }
        let removed = self.procedures.remove(position);
        debug!(%id, count = self.procedures.len(), "procedure removed");
        Ok(removed)
    }

    /// Updates one field of a procedure row.
    ///
    /// A value edit clears the step-1 message as soon as any row qualifies.
    pub fn edit_procedure(
        &mut self,
        id: EntryId,
        edit: ProcedureEdit,
    ) -> Result<(), WizardError> {
        let position = self.procedure_position(id)?;
        let entry = &mut self.procedures[position];
        match edit {
            ProcedureEdit::Name(name) => entry.name = name,
            ProcedureEdit::GrossValue(value) => {
                entry.gross_value = value.unwrap_or(Decimal::ZERO);
                if self.has_qualifying_procedure()
                    && self.gate_error == Some(WizardError::NoQualifyingProcedure)
                {
                    self.gate_error = None;
                }
            }
        }
        Ok(())
    }

    /// Replaces blank rows with imported ones. Does nothing for an empty import.
    pub fn import_procedures(
        &mut self,
        entries: impl IntoIterator<Item = ProcedureEntry>,
    ) {
        let entries: Vec<ProcedureEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return;
        }
        self.procedures
            .retain(|p| !p.name.is_empty() || !p.gross_value.is_zero());
        self.procedures.extend(entries);
        if self.has_qualifying_procedure()
            && self.gate_error == Some(WizardError::NoQualifyingProcedure)
        {
            self.gate_error = None;
        }
        debug!(count = self.procedures.len(), "procedures imported");
    }

    fn procedure_position(
        &self,
        id: EntryId,
    ) -> Result<usize, WizardError> {
        self.procedures
            .iter()
            .position(|p| p.id == id)
            .ok_or(WizardError::UnknownProcedure(id))
    }

    fn has_qualifying_procedure(&self) -> bool {
        self.procedures.iter().any(ProcedureEntry::has_qualifying_value)
    }

    // ─── additional costs ────────────────────────────────────────────────────

    /// Appends a blank cost row and returns its position.
    pub fn add_additional_cost(&mut self) -> usize {
        self.additional_costs.push(AdditionalCostEntry::empty());
        debug!(count = self.additional_costs.len(), "additional cost added");
        self.additional_costs.len() - 1
    }

    pub fn remove_additional_cost(
        &mut self,
        index: usize,
    ) -> Result<AdditionalCostEntry, WizardError> {
        if index >= self.additional_costs.len() {
            return Err(WizardError::UnknownCost(index));
        }
        Ok(self.additional_costs.remove(index))
    }

    pub fn edit_additional_cost(
        &mut self,
        index: usize,
        edit: CostEdit,
    ) -> Result<(), WizardError> {
        let cost = self
            .additional_costs
            .get_mut(index)
            .ok_or(WizardError::UnknownCost(index))?;
        match edit {
            CostEdit::Description(description) => cost.description = description,
            CostEdit::Amount(amount) => cost.amount = amount.unwrap_or(Decimal::ZERO),
            CostEdit::Kind(kind) => cost.kind = kind,
        }
        Ok(())
    }

    pub fn import_additional_costs(
        &mut self,
        entries: impl IntoIterator<Item = AdditionalCostEntry>,
    ) {
        self.additional_costs.extend(entries);
        debug!(count = self.additional_costs.len(), "additional costs imported");
    }

    // ─── percentages ─────────────────────────────────────────────────────────

    /// Stores a percentage. `None` records a blank or non-numeric input.
    ///
    /// Clears the blocking message for this field once the value is valid.
    pub fn set_tax_field(
        &mut self,
        field: TaxField,
        value: Option<Decimal>,
    ) {
        self.tax.set(field, value);
        let fixed = match &self.gate_error {
            Some(WizardError::InvalidField(err)) => {
                err.field == Field::from(field) && validate_field(err.field, value).is_ok()
            }
            _ => false,
        };
        if fixed {
            self.gate_error = None;
        }
    }

    /// Every current field-level problem, in screen order.
    pub fn field_errors(&self) -> Vec<FieldIssue> {
        let procedures = self.procedures.iter().filter_map(|p| {
            validate_field(Field::GrossValue, Some(p.gross_value))
                .err()
                .map(|error| FieldIssue {
                    location: FieldLocation::Procedure(p.id),
                    error,
                })
        });
        let taxes = TAX_FIELDS.into_iter().filter_map(|field| {
            validate_field(field.into(), self.tax.get(field))
                .err()
                .map(|error| FieldIssue {
                    location: FieldLocation::Tax(field),
                    error,
                })
        });
        let costs = self
            .additional_costs
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                validate_field(Field::CostAmount, Some(c.amount))
                    .err()
                    .map(|error| FieldIssue {
                        location: FieldLocation::Cost(index),
                        error,
                    })
            });

        procedures.chain(costs).chain(taxes).collect()
    }

    // ─── navigation ──────────────────────────────────────────────────────────

    /// Moves to the next step if the current step's gate passes.
    ///
    /// From the tax step this submits; from the results step it does nothing.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Procedures => {
                if !self.has_qualifying_procedure() {
                    return Err(self.refuse(WizardError::NoQualifyingProcedure));
                }
            }
            WizardStep::ContractShare => {
                if let Err(err) =
                    validate_field(Field::ContractSharePercent, self.tax.contract_share_percent)
                {
                    return Err(self.refuse(err.into()));
                }
            }
            WizardStep::AdditionalCosts => {}
            WizardStep::TaxRates => return self.submit().map(|_| WizardStep::Results),
            WizardStep::Results => return Ok(self.step),
        }

        self.gate_error = None;
        if let Some(next) = self.step.next() {
            debug!(from = %self.step, to = %next, "advancing");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Moves to the previous step without validation.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            debug!(from = %self.step, to = %previous, "going back");
            self.step = previous;
        }
        self.step
    }

    /// Runs the calculation and jumps to the results step.
    ///
    /// Blank percentages count as zero; percentages outside 0–100, a
    /// missing contract percentage and amounts above
    /// [`MAX_AMOUNT`](crate::validation::MAX_AMOUNT) are refused. Negative
    /// costs stay warnings.
    pub fn submit(&mut self) -> Result<&CalculationResult, WizardError> {
        let invalid_rate = TAX_FIELDS
            .into_iter()
            .find_map(|field| validate_field(field.into(), self.tax.get(field)).err());
        if let Some(err) = invalid_rate {
            return Err(self.refuse(err.into()));
        }
        let oversized = self
            .field_errors()
            .into_iter()
            .find(|issue| issue.error.violation == Violation::AboveMax);
        if let Some(issue) = oversized {
            return Err(self.refuse(issue.error.into()));
        }

        let calculated = self.calculator.calculate(
            &self.procedures,
            &self.additional_costs,
            &self.tax.resolve(),
        );
        let result = match calculated {
            Ok(result) => result,
            Err(err) => return Err(self.refuse(err.into())),
        };
        info!(
            net_income = %result.net_income,
            profit_margin = %result.profit_margin,
            "calculation submitted"
        );

        self.gate_error = None;
        self.step = WizardStep::Results;
        Ok(&*self.result.insert(result))
    }

    /// Discards everything and starts over at step 1.
    pub fn reset(&mut self) {
        self.step = WizardStep::Procedures;
        self.procedures = vec![ProcedureEntry::empty()];
        self.additional_costs.clear();
        self.tax = TaxDraft::default();
        self.gate_error = None;
        self.result = None;
        debug!("wizard reset");
    }

    fn refuse(
        &mut self,
        err: WizardError,
    ) -> WizardError {
        warn!(step = %self.step, error = %err, "navigation refused");
        self.gate_error = Some(err.clone());
        err
    }
}
