//! Shared types, error model, and configuration for the utilisation report.
//!
//! This crate is the foundation depended on by the other utilreport crates.
//! It provides:
//! - [`ReportError`], the unified error type
//! - Source types ([`SourceRecord`], [`PersonSlot`], [`UtilisationSnapshot`])
//!   and the output [`DisplayRow`]
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, OutputFormat, ReportConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ReportError, Result};
pub use types::{
    DisplayRow, Employee, External, MonthSample, NumericValue, PLACEHOLDER, PersonPayload,
    PersonSlot, QuarterEarnings, SourceRecord, Team, UtilisationSnapshot,
};
