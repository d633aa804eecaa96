//! Optional TOML configuration for the command-line calculator.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "dental-income.log"
//! stdout = false
//!
//! [defaults]
//! social_contribution_rate_percent = "21.4"
//! income_tax_rate_percent = "25"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::io;
use std::path::{Path, PathBuf};

use income_core::models::TaxDraft;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Log file, appended to. No file logging when unset.
    pub file: Option<PathBuf>,
    /// Whether log records are also written to stderr.
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            stdout: true,
        }
    }
}

/// Suggested percentages used to prefill a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultRates {
    pub contract_share_percent: Option<Decimal>,
    pub social_contribution_rate_percent: Option<Decimal>,
    pub income_tax_rate_percent: Option<Decimal>,
}

impl DefaultRates {
    pub fn to_tax_draft(&self) -> TaxDraft {
        TaxDraft {
            contract_share_percent: self.contract_share_percent,
            social_contribution_rate_percent: self.social_contribution_rate_percent,
            income_tax_rate_percent: self.income_tax_rate_percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub defaults: DefaultRates,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads the config at `path`.
    ///
    /// Returns defaults when no path is given or when the file does not exist.
    /// Any other read failure is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.stdout);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"

            [defaults]
            social_contribution_rate_percent = "21.4"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, None);
        assert!(config.logging.stdout);
        assert_eq!(
            config.defaults.social_contribution_rate_percent,
            Some(dec!(21.4))
        );
        assert_eq!(config.defaults.income_tax_rate_percent, None);
    }

    #[test]
    fn defaults_become_a_tax_draft() {
        let rates = DefaultRates {
            contract_share_percent: Some(dec!(40)),
            social_contribution_rate_percent: Some(dec!(21.4)),
            income_tax_rate_percent: None,
        };

        let draft = rates.to_tax_draft();

        assert_eq!(draft.contract_share_percent, Some(dec!(40)));
        assert_eq!(draft.income_tax_rate_percent, None);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = AppConfig::from_toml_str("[logging\nlevel = ");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Some(Path::new("/this/path/does/not/exist.toml"))).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let result = AppConfig::load(Some(Path::new(env!("CARGO_MANIFEST_DIR"))));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
