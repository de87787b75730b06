//! Row building and report assembly for the utilisation report.
//!
//! This crate turns loaded source records into display rows (`rows`),
//! owning the percentage and money formatting rules (`format`), plus the
//! JSON source loader and the report envelope the CLI prints.

pub mod format;
pub mod report;
pub mod rows;
pub mod source;

pub use format::{PersonKind, format_money, format_percentage};
pub use report::{Report, build_report};
pub use rows::{
    RowBuilderOptions, RowStats, build_rows, build_rows_with_options, build_rows_with_stats,
};
pub use source::{load_source, parse_source};
