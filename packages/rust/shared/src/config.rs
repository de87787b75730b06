//! Application configuration for the utilisation report.
//!
//! User config lives at `~/.utilreport/utilreport.toml`.
//! CLI flags override config file values, which override defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "utilreport.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".utilreport";

// ---------------------------------------------------------------------------
// Config structs (matching utilreport.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Row formatting settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Source data document used when `--source` is not given.
    #[serde(default = "default_source_path")]
    pub source_path: String,

    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            output_format: OutputFormat::default(),
        }
    }
}

fn default_source_path() -> String {
    "source-data.json".into()
}

/// How the CLI prints the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned plain text.
    #[default]
    Table,
    /// JSON array of rows.
    Json,
    /// JSON object with rows, filter statistics and a timestamp.
    Report,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "report" => Ok(Self::Report),
            other => Err(ReportError::validation(format!(
                "unknown output format '{other}': expected 'table', 'json', or 'report'"
            ))),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Currency code appended to money values.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Quarter whose earnings are shown as an employee's net earnings.
    #[serde(default = "default_earnings_quarter")]
    pub earnings_quarter: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            earnings_quarter: default_earnings_quarter(),
        }
    }
}

fn default_currency() -> String {
    "EUR".into()
}
fn default_earnings_quarter() -> String {
    "Q3".into()
}

impl ReportConfig {
    /// Reject values that would produce malformed rows.
    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(ReportError::config("report.currency must not be empty"));
        }
        if !matches!(self.earnings_quarter.as_str(), "Q1" | "Q2" | "Q3" | "Q4") {
            return Err(ReportError::config(format!(
                "report.earnings_quarter '{}' is not one of Q1..Q4",
                self.earnings_quarter
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.utilreport/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ReportError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.utilreport/utilreport.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| ReportError::config(format!("failed to parse {}: {e}", path.display())))?;
    config.report.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ReportError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ReportError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
