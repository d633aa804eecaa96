use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use income_core::Wizard;
use income_ui::config::AppConfig;
use income_ui::report::{ResultsReport, render_json};
use income_ui::session::SessionFile;
use income_ui::shell::Shell;
use income_ui::{csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net income calculator for self-employed dental professionals.
///
/// Collects billed procedures, the clinic contract percentage, additional
/// costs and tax rates, then reports net income.
#[derive(Debug, Parser)]
#[command(name = "dental-income", version, about)]
struct Cli {
    /// TOML config file (logging and suggested rates).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file; overrides the config file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one calculation from files and print the results.
    Calc {
        /// TOML session with procedures, costs and percentages.
        #[arg(short, long)]
        session: Option<PathBuf>,

        /// CSV of procedures (`name,gross_value`).
        #[arg(short, long)]
        procedures: Option<PathBuf>,

        /// CSV of additional costs (`description,amount[,kind]`).
        #[arg(short, long)]
        costs: Option<PathBuf>,

        /// Print the result as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Walk through the calculator step by step on the terminal.
    Shell,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    logging::init_logging(&config.logging)?;
    if let Some(path) = cli.config.as_deref().filter(|path| !path.exists()) {
        warn!(path = %path.display(), "config file not found, using defaults");
    }
    debug!(?config, "configuration loaded");

    let defaults = config.defaults.to_tax_draft();

    match cli.command {
        Command::Calc {
            session,
            procedures,
            costs,
            json,
        } => {
            let mut wizard = Wizard::new().with_tax_defaults(defaults);

            if let Some(path) = &procedures {
                let rows = csv_loader::load_procedures_from_file(path)
                    .with_context(|| format!("failed to load procedures: {}", path.display()))?;
                info!(count = rows.len(), "procedures loaded");
                wizard.import_procedures(rows);
            }
            if let Some(path) = &costs {
                let rows = csv_loader::load_costs_from_file(path)
                    .with_context(|| format!("failed to load costs: {}", path.display()))?;
                info!(count = rows.len(), "additional costs loaded");
                wizard.import_additional_costs(rows);
            }

            let session = match &session {
                Some(path) => SessionFile::from_file(path)
                    .with_context(|| format!("failed to load session: {}", path.display()))?,
                None => SessionFile::default(),
            };

            let result = session.replay(&mut wizard).context("calculation refused")?;

            if json {
                println!("{}", render_json(&result)?);
            } else {
                println!("{}", ResultsReport(&result));
            }
        }
        Command::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(defaults, stdin.lock(), io::stdout());
            shell.run().context("terminal i/o failed")?;
        }
    }

    Ok(())
}
