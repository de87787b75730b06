//! Row builder: source records → display rows.
//!
//! The builder keeps one row per record that describes exactly one person
//! (employee or external) whose status is `"active"`, in input order.
//! Everything else is dropped and counted in [`RowStats`]. Building never
//! fails; missing data degrades to placeholders.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use utilreport_shared::{
    DisplayRow, NumericValue, PersonPayload, PersonSlot, ReportConfig, SourceRecord,
    UtilisationSnapshot,
};

use crate::format::{PersonKind, format_money, format_percentage};

/// Calendar months shown as individual columns, in column order.
const REPORT_MONTHS: [&str; 3] = ["June", "July", "August"];

/// Suffix appended to the display name of externals.
const EXTERNAL_SUFFIX: &str = " (External)";

/// Knobs for row formatting. The defaults give the standard report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBuilderOptions {
    /// Currency code appended to the net earnings column.
    pub currency: String,
    /// Quarter whose earnings are reported for employees.
    pub earnings_quarter: String,
}

impl Default for RowBuilderOptions {
    fn default() -> Self {
        Self {
            currency: "EUR".into(),
            earnings_quarter: "Q3".into(),
        }
    }
}

impl From<&ReportConfig> for RowBuilderOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            earnings_quarter: config.earnings_quarter.clone(),
        }
    }
}

/// Counts of what happened to each input record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStats {
    /// Records seen.
    pub total: usize,
    /// Records that produced a row.
    pub retained: usize,
    /// Records with neither an employee nor an external payload.
    pub vacant: usize,
    /// Records whose person is not `"active"`.
    pub inactive: usize,
    /// Records carrying both payloads.
    pub conflicting: usize,
}

impl RowStats {
    /// Records that produced no row.
    pub fn dropped(&self) -> usize {
        self.vacant + self.inactive + self.conflicting
    }
}

/// Why a record produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    Vacant,
    Inactive,
    Conflicting,
}

/// The person a retained record describes.
struct ActivePerson<'a> {
    kind: PersonKind,
    payload: &'a PersonPayload,
    monthly_cost: Option<&'a NumericValue>,
}

/// Build display rows with the default options.
pub fn build_rows(records: &[SourceRecord]) -> Vec<DisplayRow> {
    build_rows_with_options(records, &RowBuilderOptions::default())
}

/// Build display rows with explicit options.
pub fn build_rows_with_options(
    records: &[SourceRecord],
    options: &RowBuilderOptions,
) -> Vec<DisplayRow> {
    build_rows_with_stats(records, options).0
}

/// Build display rows and report how many records were dropped and why.
#[instrument(skip_all, fields(record_count = records.len()))]
pub fn build_rows_with_stats(
    records: &[SourceRecord],
    options: &RowBuilderOptions,
) -> (Vec<DisplayRow>, RowStats) {
    let mut rows = Vec::with_capacity(records.len());
    let mut stats = RowStats {
        total: records.len(),
        ..RowStats::default()
    };

    for (index, record) in records.iter().enumerate() {
        match classify(&record.slot) {
            Ok(person) => {
                rows.push(build_row(&person, options));
                stats.retained += 1;
            }
            Err(reason) => {
                match reason {
                    DropReason::Vacant => stats.vacant += 1,
                    DropReason::Inactive => stats.inactive += 1,
                    DropReason::Conflicting => {
                        warn!(index, "record has both employee and external payloads, skipping");
                        stats.conflicting += 1;
                    }
                }
                debug!(index, kind = record.slot.label(), ?reason, "record dropped");
            }
        }
    }

    debug!(
        retained = stats.retained,
        dropped = stats.dropped(),
        "rows built"
    );

    (rows, stats)
}

/// Decide whether a record describes one active person.
fn classify(slot: &PersonSlot) -> Result<ActivePerson<'_>, DropReason> {
    let person = match slot {
        PersonSlot::Vacant => return Err(DropReason::Vacant),
        PersonSlot::Conflicting { .. } => return Err(DropReason::Conflicting),
        PersonSlot::Employee(employee) => ActivePerson {
            kind: PersonKind::Employee,
            payload: &employee.person,
            monthly_cost: None,
        },
        PersonSlot::External(external) => ActivePerson {
            kind: PersonKind::External,
            payload: &external.person,
            monthly_cost: external.monthly_cost.as_ref(),
        },
    };

    if person.payload.is_active() {
        Ok(person)
    } else {
        Err(DropReason::Inactive)
    }
}

fn build_row(person: &ActivePerson<'_>, options: &RowBuilderOptions) -> DisplayRow {
    let snapshot = person.payload.workforce_utilisation.as_ref();
    let [june, july, august] = REPORT_MONTHS.map(|month| month_rate(snapshot, month));

    DisplayRow {
        person: display_name(person),
        past12_months: format_percentage(
            snapshot.and_then(|s| s.utilisation_rate_last_twelve_months.as_ref()),
        ),
        y2d: format_percentage(snapshot.and_then(|s| s.utilisation_rate_year_to_date.as_ref())),
        june,
        july,
        august,
        net_earnings_prev_month: format_money(
            net_earnings(person, options),
            person.kind,
            &options.currency,
        ),
    }
}

fn display_name(person: &ActivePerson<'_>) -> String {
    let name = format!("{} {}", person.payload.firstname, person.payload.lastname);
    match person.kind {
        PersonKind::Employee => name,
        PersonKind::External => name + EXTERNAL_SUFFIX,
    }
}

fn month_rate(snapshot: Option<&UtilisationSnapshot>, month: &str) -> String {
    format_percentage(
        snapshot
            .and_then(|s| s.month(month))
            .and_then(|sample| sample.utilisation_rate.as_ref()),
    )
}

/// Employees report the configured quarter's earnings, externals their
/// monthly cost. `None` formats as zero.
fn net_earnings<'a>(
    person: &ActivePerson<'a>,
    options: &RowBuilderOptions,
) -> Option<&'a NumericValue> {
    match person.kind {
        PersonKind::Employee => person
            .payload
            .workforce_utilisation
            .as_ref()
            .and_then(|s| s.quarter(&options.earnings_quarter))
            .and_then(|quarter| quarter.earnings.as_ref()),
        PersonKind::External => person.monthly_cost,
    }
}
