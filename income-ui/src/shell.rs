//! Interactive line-driven wizard.
//!
//! Reads one command per line and applies it to a [`Wizard`]. Rows are
//! addressed by their 1-based position on screen. Type `help` for the list of
//! commands.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use income_core::models::{CostEdit, CostKind, EntryId, ProcedureEdit, TaxDraft, TaxField};
use income_core::wizard::FieldLocation;
use income_core::{Wizard, WizardStep};
use tracing::debug;

use crate::report::{ResultsReport, format_currency};
use crate::utils::{opt_decimal_display, parse_optional_decimal, parse_optional_percent};

const HELP: &str = "\
Procedures:   proc add | proc name <n> <text> | proc value <n> <amount> | proc rm <n>
Costs:        cost add | cost desc <n> <text> | cost amount <n> <amount>
              cost kind <n> material|flat | cost rm <n>
Percentages:  set contract|social|tax <value>
Navigation:   next | back | submit | reset
Other:        show | help | quit";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ProcAdd,
    ProcName(usize, String),
    ProcValue(usize, String),
    ProcRemove(usize),
    CostAdd,
    CostDescription(usize, String),
    CostAmount(usize, String),
    CostKind(usize, CostKind),
    CostRemove(usize),
    Set(TaxField, String),
    Next,
    Back,
    Submit,
    Reset,
    Show,
    Help,
    Quit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseCommandError {}

fn row_number(token: Option<&str>) -> Result<usize, ParseCommandError> {
    let token = token.ok_or_else(|| ParseCommandError("missing row number".to_string()))?;
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ParseCommandError(format!("'{token}' is not a row number"))),
    }
}

/// Splits off the first whitespace-separated word.
fn next_word(input: &str) -> (Option<&str>, &str) {
    let input = input.trim_start();
    if input.is_empty() {
        return (None, input);
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (Some(word), rest.trim()),
        None => (Some(input), ""),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (head, rest) = next_word(line);
        let head = head.ok_or_else(|| ParseCommandError("empty command".to_string()))?;
        let (action, rest) = next_word(rest);

        match (head.to_ascii_lowercase().as_str(), action) {
            ("proc", Some("add")) => Ok(Command::ProcAdd),
            ("proc", Some(action @ ("name" | "value" | "rm"))) => {
                let (n, value) = next_word(rest);
                let n = row_number(n)?;
                Ok(match action {
                    "name" => Command::ProcName(n, value.to_string()),
                    "value" => Command::ProcValue(n, value.to_string()),
                    _ => Command::ProcRemove(n),
                })
            }
            ("cost", Some("add")) => Ok(Command::CostAdd),
            ("cost", Some(action @ ("desc" | "amount" | "kind" | "rm"))) => {
                let (n, value) = next_word(rest);
                let n = row_number(n)?;
                match action {
                    "desc" => Ok(Command::CostDescription(n, value.to_string())),
                    "amount" => Ok(Command::CostAmount(n, value.to_string())),
                    "kind" => value
                        .parse::<CostKind>()
                        .map(|kind| Command::CostKind(n, kind))
                        .map_err(ParseCommandError),
                    _ => Ok(Command::CostRemove(n)),
                }
            }
            ("set", Some(field)) => {
                let field = match field {
                    "contract" => TaxField::ContractShare,
                    "social" => TaxField::SocialContribution,
                    "tax" => TaxField::IncomeTax,
                    other => {
                        return Err(ParseCommandError(format!("unknown field '{other}'")));
                    }
                };
                Ok(Command::Set(field, rest.to_string()))
            }
            ("next", None) => Ok(Command::Next),
            ("back", None) => Ok(Command::Back),
            ("submit", None) => Ok(Command::Submit),
            ("reset", None) => Ok(Command::Reset),
            ("show", None) => Ok(Command::Show),
            ("help" | "?", None) => Ok(Command::Help),
            ("quit" | "exit", None) => Ok(Command::Quit),
            _ => Err(ParseCommandError(format!(
                "unrecognised command '{}'",
                line.trim()
            ))),
        }
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive session: a wizard plus the streams it talks through.
pub struct Shell<R, W> {
    wizard: Wizard,
    defaults: TaxDraft,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// `defaults` prefill the percentages at start and after every reset.
    pub fn new(
        defaults: TaxDraft,
        input: R,
        output: W,
    ) -> Self {
        Self {
            wizard: Wizard::new().with_tax_defaults(defaults.clone()),
            defaults,
            input,
            output,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Dental income calculator. Type 'help' for commands.")?;
        self.render_step()?;

        let mut line = String::new();
        loop {
            write!(self.output, "[{}]> ", self.wizard.step())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(err) => writeln!(self.output, "! {err}")?,
            }
        }
    }

    /// Applies one command and prints its outcome.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> io::Result<Flow> {
        debug!(?command, "shell command");
        let before = self.wizard.step();

        let outcome: Result<(), String> = match command {
            Command::ProcAdd => {
                self.wizard.add_procedure();
                Ok(())
            }
            Command::ProcName(n, name) => self
                .procedure_id(n)
                .and_then(|id| self.edit_procedure(id, ProcedureEdit::Name(name))),
            Command::ProcValue(n, raw) => self.procedure_id(n).and_then(|id| {
                self.edit_procedure(id, ProcedureEdit::GrossValue(parse_optional_decimal(&raw)))
            }),
            Command::ProcRemove(n) => self.procedure_id(n).and_then(|id| {
                self.wizard
                    .remove_procedure(id)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
            Command::CostAdd => {
                self.wizard.add_additional_cost();
                Ok(())
            }
            Command::CostDescription(n, text) => self.edit_cost(n, CostEdit::Description(text)),
            Command::CostAmount(n, raw) => {
                self.edit_cost(n, CostEdit::Amount(parse_optional_decimal(&raw)))
            }
            Command::CostKind(n, kind) => self.edit_cost(n, CostEdit::Kind(kind)),
            Command::CostRemove(n) => self.cost_index(n).and_then(|index| {
                self.wizard
                    .remove_additional_cost(index)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            }),
            Command::Set(field, raw) => {
                self.wizard.set_tax_field(field, parse_optional_percent(&raw));
                Ok(())
            }
            Command::Next => self.wizard.advance().map(|_| ()).map_err(|e| e.to_string()),
            Command::Back => {
                self.wizard.retreat();
                Ok(())
            }
            Command::Submit => self.wizard.submit().map(|_| ()).map_err(|e| e.to_string()),
            Command::Reset => {
                self.wizard.reset();
                self.wizard = std::mem::take(&mut self.wizard).with_tax_defaults(self.defaults.clone());
                Ok(())
            }
            Command::Show => {
                self.render_step()?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        if let Err(message) = outcome {
            writeln!(self.output, "! {message}")?;
        }
        if self.wizard.step() != before {
            self.render_step()?;
        }
        Ok(Flow::Continue)
    }

    fn procedure_id(
        &self,
        n: usize,
    ) -> Result<EntryId, String> {
        self.wizard
            .procedures()
            .get(n.wrapping_sub(1))
            .map(|p| p.id)
            .ok_or_else(|| format!("no procedure on row {n}"))
    }

    fn edit_procedure(
        &mut self,
        id: EntryId,
        edit: ProcedureEdit,
    ) -> Result<(), String> {
        self.wizard
            .edit_procedure(id, edit)
            .map_err(|e| e.to_string())
    }

    fn cost_index(
        &self,
        n: usize,
    ) -> Result<usize, String> {
        if (1..=self.wizard.additional_costs().len()).contains(&n) {
            Ok(n - 1)
        } else {
            Err(format!("no cost on row {n}"))
        }
    }

    fn edit_cost(
        &mut self,
        n: usize,
        edit: CostEdit,
    ) -> Result<(), String> {
        let index = self.cost_index(n)?;
        self.wizard
            .edit_additional_cost(index, edit)
            .map_err(|e| e.to_string())
    }

    /// Prints the screen for the current step.
    pub fn render_step(&mut self) -> io::Result<()> {
        let step = self.wizard.step();
        writeln!(self.output, "== Step {step} ==")?;

        match step {
            WizardStep::Procedures => {
                for (i, p) in self.wizard.procedures().iter().enumerate() {
                    let name = if p.name.is_empty() { "(unnamed)" } else { p.name.as_str() };
                    writeln!(
                        self.output,
                        "  {}. {name}: {}",
                        i + 1,
                        format_currency(p.gross_value, "EUR")
                    )?;
                }
                writeln!(
                    self.output,
                    "  Total: {}",
                    format_currency(self.wizard.procedures_total(), "EUR")
                )?;
            }
            WizardStep::ContractShare => {
                writeln!(
                    self.output,
                    "  Contract percentage: {}",
                    opt_decimal_display(&self.wizard.tax_draft().contract_share_percent)
                )?;
            }
            WizardStep::AdditionalCosts => {
                if self.wizard.additional_costs().is_empty() {
                    writeln!(self.output, "  No costs added. Use 'cost add' for materials, travel, etc.")?;
                }
                for (i, c) in self.wizard.additional_costs().iter().enumerate() {
                    let description = if c.description.is_empty() {
                        "(unnamed)"
                    } else {
                        c.description.as_str()
                    };
                    writeln!(
                        self.output,
                        "  {}. {description} [{}]: {}",
                        i + 1,
                        c.kind,
                        format_currency(c.amount, "EUR")
                    )?;
                }
                writeln!(
                    self.output,
                    "  Total: {}",
                    format_currency(self.wizard.additional_costs_total(), "EUR")
                )?;
            }
            WizardStep::TaxRates => {
                let tax = self.wizard.tax_draft();
                writeln!(
                    self.output,
                    "  Social contribution rate: {}",
                    opt_decimal_display(&tax.social_contribution_rate_percent)
                )?;
                writeln!(
                    self.output,
                    "  Income tax rate:          {}",
                    opt_decimal_display(&tax.income_tax_rate_percent)
                )?;
            }
            WizardStep::Results => match self.wizard.result() {
                Some(result) => writeln!(self.output, "{}", ResultsReport(result))?,
                None => writeln!(self.output, "  No result yet. Use 'reset' to start over.")?,
            },
        }

        let issues = self
            .wizard
            .field_errors()
            .into_iter()
            .filter(|issue| issue.location.step() == step);
        for issue in issues {
            let place = match issue.location {
                FieldLocation::Procedure(id) => self
                    .wizard
                    .procedures()
                    .iter()
                    .position(|p| p.id == id)
                    .map(|i| format!("procedure {}", i + 1))
                    .unwrap_or_default(),
                FieldLocation::Cost(i) => format!("cost {}", i + 1),
                FieldLocation::Tax(_) => "settings".to_string(),
            };
            writeln!(self.output, "  warning ({place}): {}", issue.error)?;
        }
        if let Some(message) = self.wizard.validation_error() {
            writeln!(self.output, "  ! {message}")?;
        }
        Ok(())
    }
}
