use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntryId;

/// Category of an extra expense subtracted from contract income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    /// Consumables and instruments (gloves, burs, impression material).
    #[default]
    Material,
    /// Fixed allowances such as meals or travel.
    Flat,
}

impl CostKind {
    pub fn label(&self) -> &'static str {
        match self {
            CostKind::Material => "material",
            CostKind::Flat => "flat",
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "material" | "materials" => Ok(CostKind::Material),
            "flat" | "meals" | "travel" => Ok(CostKind::Flat),
            other => Err(format!("unknown cost kind '{other}'")),
        }
    }
}

/// An extra expense entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCostEntry {
    pub id: EntryId,
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub kind: CostKind,
}

impl AdditionalCostEntry {
    pub fn empty() -> Self {
        Self {
            id: EntryId::new(),
            description: String::new(),
            amount: Decimal::ZERO,
            kind: CostKind::default(),
        }
    }

    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: CostKind,
    ) -> Self {
        Self {
            id: EntryId::new(),
            description: description.into(),
            amount,
            kind,
        }
    }
}

/// A single field edit applied to an [`AdditionalCostEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostEdit {
    Description(String),
    /// `None` stands for a blank or non-numeric input and is stored as zero.
    Amount(Option<Decimal>),
    Kind(CostKind),
}
