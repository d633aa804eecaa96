mod additional_cost;
mod calculation_result;
mod entry_id;
mod procedure;
mod tax_configuration;

pub use additional_cost::{AdditionalCostEntry, CostEdit, CostKind};
pub use calculation_result::{AdditionalCostItem, CalculationResult, DEFAULT_CURRENCY};
pub use entry_id::EntryId;
pub use procedure::{ProcedureEdit, ProcedureEntry};
pub use tax_configuration::{TaxConfiguration, TaxDraft, TaxField};
