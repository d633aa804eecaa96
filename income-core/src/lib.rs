//! Core of the dental income calculator: data model, calculation engine,
//! field validation rules and the step-by-step wizard controller.

pub mod calculations;
pub mod models;
pub mod validation;
pub mod wizard;

pub use calculations::{CalculationError, IncomeCalculator, IncomeCalculatorConfig, compute};
pub use models::*;
pub use wizard::{Wizard, WizardError, WizardStep};
