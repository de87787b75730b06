//! Source and display types for the utilisation report.
//!
//! The source side mirrors the personnel export (`employees` / `externals`
//! keys, camelCase fields, numbers encoded as strings). The display side is
//! the flat row handed to whatever renders the table.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Rendered in place of a value that is not available.
pub const PLACEHOLDER: &str = "—";

/// Decode a field, falling back to its default when the value is `null` or
/// has the wrong JSON type. One odd field never costs the whole record.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list element by element, skipping entries that do not fit.
/// Anything other than an array reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

// ---------------------------------------------------------------------------
// NumericValue
// ---------------------------------------------------------------------------

/// A number as found in the export: usually a decimal string (`"0.73"`),
/// occasionally a bare JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    /// The value as a finite `f64`, or `None` if it does not parse.
    ///
    /// Text is read up to the end of its leading number, so `"1500 EUR"` is
    /// `1500`. `NaN` and infinities are rejected whichever way they were
    /// spelled.
    pub fn to_f64(&self) -> Option<f64> {
        static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
        });

        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => NUMBER_PREFIX_RE
                .find(s.trim_start())?
                .as_str()
                .parse::<f64>()
                .ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// True for text that is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

// ---------------------------------------------------------------------------
// Utilisation snapshot
// ---------------------------------------------------------------------------

/// Utilisation rate for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSample {
    /// English month name, e.g. `"June"`.
    #[serde(default, deserialize_with = "lenient")]
    pub month: String,
    /// Fraction in `[0, 1]`, typically as a string.
    #[serde(default, deserialize_with = "lenient")]
    pub utilisation_rate: Option<NumericValue>,
}

/// Earnings booked in one quarter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterEarnings {
    /// `"Q1"` through `"Q4"`.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub earnings: Option<NumericValue>,
}

/// The `workforceUtilisation` bundle attached to a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilisationSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    pub utilisation_rate_last_twelve_months: Option<NumericValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub utilisation_rate_year_to_date: Option<NumericValue>,
    /// Per-month samples in export order. Duplicates are possible.
    #[serde(default, deserialize_with = "lenient_list")]
    pub last_three_months_individually: Vec<MonthSample>,
    /// Only populated for employees.
    #[serde(default, deserialize_with = "lenient_list")]
    pub quarter_earnings: Vec<QuarterEarnings>,
}

impl UtilisationSnapshot {
    /// First sample recorded for `month`, in encounter order.
    pub fn month(&self, month: &str) -> Option<&MonthSample> {
        self.last_three_months_individually
            .iter()
            .find(|sample| sample.month == month)
    }

    /// First quarter-earnings entry named `quarter`.
    pub fn quarter(&self, quarter: &str) -> Option<&QuarterEarnings> {
        self.quarter_earnings.iter().find(|q| q.name == quarter)
    }
}

// ---------------------------------------------------------------------------
// Person payloads
// ---------------------------------------------------------------------------

/// Fields shared by employees and externals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub firstname: String,
    #[serde(default, deserialize_with = "lenient")]
    pub lastname: String,
    /// Lifecycle status; only `"active"` people appear in the report.
    #[serde(default, deserialize_with = "lenient")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient")]
    pub workforce_utilisation: Option<UtilisationSnapshot>,
}

impl PersonPayload {
    /// Payload with a name and status and no utilisation data.
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            status: status.into(),
            workforce_utilisation: None,
        }
    }

    /// Attach a utilisation snapshot.
    pub fn with_utilisation(mut self, snapshot: UtilisationSnapshot) -> Self {
        self.workforce_utilisation = Some(snapshot);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// An internal employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub person: PersonPayload,
}

/// An external contractor: the employee shape plus a monthly cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct External {
    #[serde(flatten)]
    pub person: PersonPayload,
    #[serde(default, deserialize_with = "lenient")]
    pub monthly_cost: Option<NumericValue>,
}

/// Team metadata that travels with a record. Not used by the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: String,
}

// ---------------------------------------------------------------------------
// SourceRecord
// ---------------------------------------------------------------------------

/// Which kind of person, if any, a record describes.
#[derive(Debug, Clone, PartialEq)]
pub enum PersonSlot {
    /// Neither payload present; not a person.
    Vacant,
    Employee(Employee),
    External(External),
    /// Both payloads present. Never reported.
    Conflicting {
        employee: Employee,
        external: External,
    },
}

impl PersonSlot {
    /// Short label for logs and statistics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacant => "vacant",
            Self::Employee(_) => "employee",
            Self::External(_) => "external",
            Self::Conflicting { .. } => "conflicting",
        }
    }
}

/// One entry of the source export.
///
/// Deserialization never rejects a record for carrying the wrong mix of
/// payloads; it is classified into a [`PersonSlot`] instead. Fields of the
/// wrong JSON type read as missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSourceRecord")]
pub struct SourceRecord {
    pub slot: PersonSlot,
    /// Team metadata, carried through untouched.
    pub teams: Vec<Team>,
}

impl SourceRecord {
    pub fn employee(person: PersonPayload) -> Self {
        Self::from_slot(PersonSlot::Employee(Employee { person }))
    }

    pub fn external(person: PersonPayload, monthly_cost: Option<NumericValue>) -> Self {
        Self::from_slot(PersonSlot::External(External {
            person,
            monthly_cost,
        }))
    }

    pub fn vacant() -> Self {
        Self::from_slot(PersonSlot::Vacant)
    }

    fn from_slot(slot: PersonSlot) -> Self {
        Self {
            slot,
            teams: Vec::new(),
        }
    }
}

/// Wire shape: two optional payload keys side by side.
#[derive(Deserialize)]
struct RawSourceRecord {
    #[serde(default, deserialize_with = "lenient")]
    employees: Option<Employee>,
    #[serde(default, deserialize_with = "lenient")]
    externals: Option<External>,
    #[serde(default, deserialize_with = "lenient_list")]
    teams: Vec<Team>,
}

impl From<RawSourceRecord> for SourceRecord {
    fn from(raw: RawSourceRecord) -> Self {
        let slot = match (raw.employees, raw.externals) {
            (None, None) => PersonSlot::Vacant,
            (Some(employee), None) => PersonSlot::Employee(employee),
            (None, Some(external)) => PersonSlot::External(external),
            (Some(employee), Some(external)) => PersonSlot::Conflicting { employee, external },
        };
        Self {
            slot,
            teams: raw.teams,
        }
    }
}

// ---------------------------------------------------------------------------
// DisplayRow
// ---------------------------------------------------------------------------

/// One presentation-ready row of the report. Every field is display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub person: String,
    pub past12_months: String,
    pub y2d: String,
    pub june: String,
    pub july: String,
    pub august: String,
    pub net_earnings_prev_month: String,
}
