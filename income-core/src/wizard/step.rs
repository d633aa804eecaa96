use std::fmt;

use serde::{Deserialize, Serialize};

/// The five screens of the calculator, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    /// Billed procedures.
    #[default]
    Procedures,
    /// Clinic contract percentage.
    ContractShare,
    /// Materials and flat costs.
    AdditionalCosts,
    /// Social contribution and income tax rates.
    TaxRates,
    /// Results dashboard.
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Procedures,
        WizardStep::ContractShare,
        WizardStep::AdditionalCosts,
        WizardStep::TaxRates,
        WizardStep::Results,
    ];

    /// 1-based position shown to the user.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Procedures => 1,
            WizardStep::ContractShare => 2,
            WizardStep::AdditionalCosts => 3,
            WizardStep::TaxRates => 4,
            WizardStep::Results => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Procedures => "Procedures",
            WizardStep::ContractShare => "Contract",
            WizardStep::AdditionalCosts => "Additional costs",
            WizardStep::TaxRates => "Tax settings",
            WizardStep::Results => "Results",
        }
    }

    /// The following step, or `None` from the last one.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, or `None` from the first one.
    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/5 {}", self.number(), self.title())
    }
}
