//! End-to-end walks through the wizard, from the first procedure to the
//! results step, checking the figures the results screen would show.

use income_core::models::{CostEdit, CostKind, ProcedureEdit, TaxField};
use income_core::{Wizard, WizardError, WizardStep};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fills steps 1–4 with one 100 € procedure at 50 % / 21.4 % / 25 %.
fn fill_reference_session(wizard: &mut Wizard) {
    let id = wizard.procedures()[0].id;
    wizard
        .edit_procedure(id, ProcedureEdit::Name("Root canal".to_string()))
        .unwrap();
    wizard
        .edit_procedure(id, ProcedureEdit::GrossValue(Some(dec!(100))))
        .unwrap();
    assert_eq!(wizard.advance(), Ok(WizardStep::ContractShare));

    wizard.set_tax_field(TaxField::ContractShare, Some(dec!(50)));
    assert_eq!(wizard.advance(), Ok(WizardStep::AdditionalCosts));
    assert_eq!(wizard.advance(), Ok(WizardStep::TaxRates));

    wizard.set_tax_field(TaxField::SocialContribution, Some(dec!(21.4)));
    wizard.set_tax_field(TaxField::IncomeTax, Some(dec!(25)));
}

#[test]
fn reference_session_without_costs() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);

    let result = wizard.submit().expect("valid session").clone();

    assert_eq!(wizard.step(), WizardStep::Results);
    assert_eq!(result.gross_income, dec!(100));
    assert_eq!(result.contract_income, dec!(50));
    assert_eq!(result.social_contributions_amount, dec!(10.70));
    assert_eq!(result.tax_amount, dec!(12.50));
    assert_eq!(result.net_income, dec!(26.80));
    assert_eq!(result.profit_margin, dec!(26.8));
    assert_eq!(result.vat_amount, Decimal::ZERO);
    assert_eq!(result.currency, "EUR");
}

#[test]
fn reference_session_with_a_cost_goes_negative() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);
    assert_eq!(wizard.retreat(), WizardStep::AdditionalCosts);
    let index = wizard.add_additional_cost();
    wizard
        .edit_additional_cost(index, CostEdit::Description("Impression material".to_string()))
        .unwrap();
    wizard
        .edit_additional_cost(index, CostEdit::Amount(Some(dec!(30))))
        .unwrap();
    assert_eq!(wizard.advance(), Ok(WizardStep::TaxRates));

    assert_eq!(wizard.advance(), Ok(WizardStep::Results));
    let result = wizard.result().expect("submitted");

    assert_eq!(result.net_income, dec!(-3.20));
    assert_eq!(result.additional_cost_items.len(), 1);
    assert_eq!(result.additional_cost_items[0].description, "Impression material");
    assert_eq!(result.additional_cost_items[0].kind, CostKind::Material);
}

#[test]
fn blocked_first_step_recovers_after_qualifying_row() {
    let mut wizard = Wizard::new();

    assert_eq!(wizard.advance(), Err(WizardError::NoQualifyingProcedure));
    assert_eq!(wizard.step(), WizardStep::Procedures);
    assert!(wizard.validation_error().is_some());

    let id = wizard.add_procedure();
    wizard
        .edit_procedure(id, ProcedureEdit::GrossValue(Some(dec!(1))))
        .unwrap();

    assert_eq!(wizard.advance(), Ok(WizardStep::ContractShare));
    assert!(wizard.validation_error().is_none());
}

#[test]
fn sole_procedure_survives_removal_attempts() {
    let mut wizard = Wizard::new();
    let id = wizard.procedures()[0].id;

    for _ in 0..3 {
        assert_eq!(wizard.remove_procedure(id), Err(WizardError::LastProcedure));
    }

    assert_eq!(wizard.procedures().len(), 1);
}

#[test]
fn reset_after_submission_starts_over() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);
    wizard.add_additional_cost();
    wizard.submit().unwrap();

    wizard.reset();

    assert_eq!(wizard.step(), WizardStep::Procedures);
    assert_eq!(wizard.procedures().len(), 1);
    assert_eq!(wizard.procedures()[0].gross_value, Decimal::ZERO);
    assert!(wizard.additional_costs().is_empty());
    assert!(wizard.result().is_none());
    assert_eq!(wizard.advance(), Err(WizardError::NoQualifyingProcedure));
}

#[test]
fn zero_gross_with_costs_has_zero_margin() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);
    let id = wizard.procedures()[0].id;
    wizard
        .edit_procedure(id, ProcedureEdit::GrossValue(None))
        .unwrap();
    let index = wizard.add_additional_cost();
    wizard
        .edit_additional_cost(index, CostEdit::Amount(Some(dec!(12))))
        .unwrap();

    let result = wizard.submit().unwrap();

    assert_eq!(result.gross_income, Decimal::ZERO);
    assert_eq!(result.net_income, dec!(-12));
    assert_eq!(result.profit_margin, Decimal::ZERO);
}

#[test]
fn oversized_amounts_are_refused_then_recover() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);
    let index = wizard.add_additional_cost();
    wizard
        .edit_additional_cost(index, CostEdit::Amount(Some(dec!(1000000000000000000000000000))))
        .unwrap();

    let err = wizard.submit().unwrap_err();

    assert!(matches!(err, WizardError::InvalidField(_)));
    assert_eq!(wizard.step(), WizardStep::TaxRates);
    assert!(wizard.result().is_none());

    wizard
        .edit_additional_cost(index, CostEdit::Amount(Some(dec!(30))))
        .unwrap();
    let result = wizard.submit().unwrap();

    assert_eq!(result.net_income, dec!(-3.20));
}

#[test]
fn largest_billed_value_is_calculated() {
    let mut wizard = Wizard::new();
    fill_reference_session(&mut wizard);
    let id = wizard.procedures()[0].id;
    wizard
        .edit_procedure(id, ProcedureEdit::GrossValue(Some(income_core::validation::MAX_AMOUNT)))
        .unwrap();

    let result = wizard.submit().unwrap();

    assert_eq!(result.contract_income, dec!(500000000));
    assert_eq!(result.net_income, dec!(268000000));
}
