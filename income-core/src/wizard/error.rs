use thiserror::Error;

use crate::calculations::CalculationError;
use crate::models::EntryId;
use crate::validation::FieldError;

/// Reasons a wizard operation was refused.
///
/// Refusals leave the wizard unchanged apart from the recorded validation
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// No procedure carries a billed value of at least 1.
    #[error("Please enter a billed value of at least 1 € to continue.")]
    NoQualifyingProcedure,

    /// The procedure list may never become empty.
    #[error("at least one procedure must remain")]
    LastProcedure,

    #[error("no procedure with id {0}")]
    UnknownProcedure(EntryId),

    /// `usize` is the 0-based position that was requested.
    #[error("no additional cost at position {0}")]
    UnknownCost(usize),

    /// A field failed its validation rule.
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// The inputs produce a figure too large to represent.
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}
