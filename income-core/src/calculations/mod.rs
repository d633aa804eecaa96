//! Income calculation modules.
//!
//! The engine is a pure function of the collected wizard inputs; shared
//! arithmetic lives in [`common`].

pub mod common;
pub mod income;

pub use income::{CalculationError, IncomeCalculator, IncomeCalculatorConfig, compute};
