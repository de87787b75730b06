//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use utilreport_core::{RowBuilderOptions, build_report, load_source};
use utilreport_shared::{AppConfig, OutputFormat, init_config, load_config};

use crate::table;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// utilreport: workforce utilisation report.
#[derive(Parser)]
#[command(
    name = "utilreport",
    version,
    about = "Render utilisation and net-earnings rows for active employees and externals.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the report rows from a source export and print them.
    Render {
        /// Source data JSON file (defaults to `defaults.source_path` from config).
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output format: table, json, or report (defaults to config).
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout only
/// carries the report.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = format!("utilreport={level},utilreport_core={level},utilreport_shared={level}");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render { source, format } => cmd_render(source.as_deref(), format),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

fn cmd_render(source: Option<&Path>, format: Option<OutputFormat>) -> Result<()> {
    let config = load_config()?;

    let source = source
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.defaults.source_path));
    let format = format.unwrap_or(config.defaults.output_format);

    if !source.is_file() {
        return Err(eyre!(
            "source data not found at '{}', pass --source or set defaults.source_path",
            source.display()
        ));
    }

    info!(source = %source.display(), %format, "rendering report");

    let records = load_source(&source)?;
    let options = RowBuilderOptions::from(&config.report);
    let report = build_report(&records, &options);

    match format {
        OutputFormat::Table => print!("{}", table::render(&report.rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.rows)?),
        OutputFormat::Report => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
