//! Declarative validation rules for the numeric form fields.
//!
//! Every numeric input is described by one row of [`FIELD_RULES`]; a single
//! generic evaluator, [`validate_field`], checks a value against its row.
//! Violations are reported as [`FieldError`]s. Whether a violation blocks
//! navigation is decided by the wizard, not here.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TaxField;

/// The numeric fields the wizard collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    GrossValue,
    ContractSharePercent,
    SocialContributionRate,
    IncomeTaxRate,
    CostAmount,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::GrossValue => "Billed value",
            Field::ContractSharePercent => "Contract percentage",
            Field::SocialContributionRate => "Social contribution rate",
            Field::IncomeTaxRate => "Income tax rate",
            Field::CostAmount => "Cost amount",
        }
    }

    /// The rule row describing this field.
    pub fn rule(&self) -> &'static FieldRule {
        match self {
            Field::GrossValue => &GROSS_VALUE_RULE,
            Field::ContractSharePercent => &CONTRACT_SHARE_RULE,
            Field::SocialContributionRate => &SOCIAL_CONTRIBUTION_RULE,
            Field::IncomeTaxRate => &INCOME_TAX_RULE,
            Field::CostAmount => &COST_AMOUNT_RULE,
        }
    }
}

impl From<TaxField> for Field {
    fn from(field: TaxField) -> Self {
        match field {
            TaxField::ContractShare => Field::ContractSharePercent,
            TaxField::SocialContribution => Field::SocialContributionRate,
            TaxField::IncomeTax => Field::IncomeTaxRate,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Messages shown for each kind of violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMessages {
    pub required: &'static str,
    pub below_min: &'static str,
    pub above_max: &'static str,
}

/// Constraints on one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub messages: RuleMessages,
}

const RATE_MESSAGES: RuleMessages = RuleMessages {
    required: "Rate is required",
    below_min: "Rate cannot be negative",
    above_max: "Rate cannot exceed 100%",
};

const AMOUNT_MESSAGES: RuleMessages = RuleMessages {
    required: "Amount is required",
    below_min: "Amount cannot be negative",
    above_max: "Amount cannot exceed 1 000 000 000",
};

/// Largest amount accepted for a single procedure or cost: one billion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

const GROSS_VALUE_RULE: FieldRule = FieldRule {
    field: Field::GrossValue,
    required: false,
    min: Some(Decimal::ZERO),
    max: Some(MAX_AMOUNT),
    messages: AMOUNT_MESSAGES,
};

const CONTRACT_SHARE_RULE: FieldRule = FieldRule {
    field: Field::ContractSharePercent,
    required: true,
    min: Some(Decimal::ZERO),
    max: Some(Decimal::ONE_HUNDRED),
    messages: RuleMessages {
        required: "Contract percentage is required",
        below_min: "Percentage cannot be less than 0",
        above_max: "Percentage cannot be greater than 100",
    },
};

const SOCIAL_CONTRIBUTION_RULE: FieldRule = FieldRule {
    field: Field::SocialContributionRate,
    required: false,
    min: Some(Decimal::ZERO),
    max: Some(Decimal::ONE_HUNDRED),
    messages: RATE_MESSAGES,
};

const INCOME_TAX_RULE: FieldRule = FieldRule {
    field: Field::IncomeTaxRate,
    required: false,
    min: Some(Decimal::ZERO),
    max: Some(Decimal::ONE_HUNDRED),
    messages: RATE_MESSAGES,
};

const COST_AMOUNT_RULE: FieldRule = FieldRule {
    field: Field::CostAmount,
    required: false,
    min: Some(Decimal::ZERO),
    max: Some(MAX_AMOUNT),
    messages: AMOUNT_MESSAGES,
};

/// Validation table for every numeric field.
pub const FIELD_RULES: &[FieldRule] = &[
    GROSS_VALUE_RULE,
    CONTRACT_SHARE_RULE,
    SOCIAL_CONTRIBUTION_RULE,
    INCOME_TAX_RULE,
    COST_AMOUNT_RULE,
];

/// Which constraint a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    BelowMin,
    AboveMax,
}

/// A field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
    pub message: &'static str,
}

impl FieldRule {
    /// Checks `value` against this rule. `None` is a blank or non-numeric input.
    pub fn check(
        &self,
        value: Option<Decimal>,
    ) -> Result<(), FieldError> {
        let fail = |violation, message| FieldError {
            field: self.field,
            violation,
            message,
        };

        let Some(value) = value else {
            return if self.required {
                Err(fail(Violation::Required, self.messages.required))
            } else {
                Ok(())
            };
        };

        if self.min.is_some_and(|min| value < min) {
            return Err(fail(Violation::BelowMin, self.messages.below_min));
        }
        if self.max.is_some_and(|max| value > max) {
            return Err(fail(Violation::AboveMax, self.messages.above_max));
        }
        Ok(())
    }
}

/// Looks up the rule for `field` and checks `value` against it.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use income_core::validation::{Field, Violation, validate_field};
///
/// assert!(validate_field(Field::ContractSharePercent, Some(dec!(50))).is_ok());
///
/// let err = validate_field(Field::ContractSharePercent, None).unwrap_err();
/// assert_eq!(err.violation, Violation::Required);
/// ```
pub fn validate_field(
    field: Field,
    value: Option<Decimal>,
) -> Result<(), FieldError> {
    field.rule().check(value)
}
