use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntryId;

/// A billed dental procedure: a name and its gross value before the contract share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureEntry {
    pub id: EntryId,
    pub name: String,
    pub gross_value: Decimal,
}

impl ProcedureEntry {
    /// An unnamed, zero-valued row with a fresh id.
    pub fn empty() -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            gross_value: Decimal::ZERO,
        }
    }

    pub fn new(
        name: impl Into<String>,
        gross_value: Decimal,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            gross_value,
        }
    }

    /// True when the row carries a billed value of at least one currency unit.
    pub fn has_qualifying_value(&self) -> bool {
        self.gross_value >= Decimal::ONE
    }
}

/// A single field edit applied to a [`ProcedureEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureEdit {
    Name(String),
    /// `None` stands for a blank or non-numeric input and is stored as zero.
    GrossValue(Option<Decimal>),
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_entry_has_no_name_and_zero_value() {
        let entry = ProcedureEntry::empty();

        assert!(entry.name.is_empty());
        assert_eq!(entry.gross_value, Decimal::ZERO);
        assert!(!entry.has_qualifying_value());
    }

    #[test]
    fn qualifying_value_starts_at_one() {
        assert!(!ProcedureEntry::new("Polish", dec!(0.99)).has_qualifying_value());
        assert!(ProcedureEntry::new("Polish", dec!(1)).has_qualifying_value());
    }
}
