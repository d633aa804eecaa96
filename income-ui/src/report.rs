//! Text and JSON rendering of a [`CalculationResult`].

use std::fmt;

use income_core::calculations::common::round_half_up;
use income_core::models::{CalculationResult, CostKind};
use rust_decimal::Decimal;

/// Formats an amount the way the Portuguese locale does: `1 234,56 €`.
///
/// Thousands are grouped only from five integer digits on, matching pt-PT.
/// Currencies other than EUR are suffixed with their code.
pub fn format_currency(
    amount: Decimal,
    currency: &str,
) -> String {
    let symbol = match currency {
        "" | "EUR" => "€",
        other => other,
    };
    format!("{} {symbol}", format_number(amount))
}

/// Formats a percentage with two decimals and a decimal comma: `26,80 %`.
pub fn format_percent(value: Decimal) -> String {
    format!("{} %", format_number(value))
}

fn format_number(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let grouped = if int_part.len() >= 5 {
        let digits: Vec<char> = int_part.chars().collect();
        digits
            .rchunks(3)
            .rev()
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        int_part.to_string()
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}

/// Plain-text results summary.
pub struct ResultsReport<'a>(pub &'a CalculationResult);

impl fmt::Display for ResultsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.0;
        let money = |amount| format_currency(amount, &r.currency);

        writeln!(f, "Gross income:           {}", money(r.gross_income))?;
        writeln!(
            f,
            "Contract income ({}): {}",
            format_percent(r.contract_share_percent),
            money(r.contract_income)
        )?;
        writeln!(
            f,
            "Social contributions:   {}",
            money(r.social_contributions_amount)
        )?;
        writeln!(f, "Income tax:             {}", money(r.tax_amount))?;
        if !r.vat_amount.is_zero() {
            writeln!(f, "VAT (not deducted):     {}", money(r.vat_amount))?;
        }
        writeln!(
            f,
            "Additional costs:       {}",
            money(r.additional_costs_total)
        )?;
        for item in &r.additional_cost_items {
            let description = if item.description.is_empty() {
                "(unnamed)"
            } else {
                item.description.as_str()
            };
            writeln!(
                f,
                "  - {description} [{}]: {}",
                item.kind,
                money(item.amount)
            )?;
        }
        if !r.additional_cost_items.is_empty() {
            writeln!(
                f,
                "    materials {} / flat {}",
                money(r.costs_by_kind(CostKind::Material)),
                money(r.costs_by_kind(CostKind::Flat))
            )?;
        }
        writeln!(f, "Total expenses:         {}", money(r.total_expenses))?;
        writeln!(f, "Net income:             {}", money(r.net_income))?;
        write!(f, "Profit margin:          {}", format_percent(r.profit_margin))
    }
}

/// Pretty-printed JSON of the result record.
pub fn render_json(result: &CalculationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
