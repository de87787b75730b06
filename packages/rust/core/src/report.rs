//! Report envelope: rows plus when and how they were built.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use utilreport_shared::{DisplayRow, SourceRecord};

use crate::rows::{RowBuilderOptions, RowStats, build_rows_with_stats};

/// A built report, ready to serialize.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// When the rows were built.
    pub generated_at: DateTime<Utc>,
    /// What happened to the input records.
    pub stats: RowStats,
    /// One row per active person, in input order.
    pub rows: Vec<DisplayRow>,
}

/// Build rows for `records` and wrap them with statistics and a timestamp.
#[instrument(skip_all, fields(record_count = records.len()))]
pub fn build_report(records: &[SourceRecord], options: &RowBuilderOptions) -> Report {
    let (rows, stats) = build_rows_with_stats(records, options);
    info!(
        retained = stats.retained,
        dropped = stats.dropped(),
        "report built"
    );
    Report {
        generated_at: Utc::now(),
        stats,
        rows,
    }
}
