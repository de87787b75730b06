//! Loading the personnel export from JSON.

use std::path::Path;

use serde_json::Value;
use tracing::{info, instrument, warn};

use utilreport_shared::{ReportError, Result, SourceRecord};

/// Parse a source document: a JSON array of records.
///
/// Only a document that is not a JSON array fails. An entry that cannot be
/// read as a record (a bare number, say) is kept as a vacant record so the
/// rest of the export still loads.
pub fn parse_source(json: &str) -> Result<Vec<SourceRecord>> {
    let entries: Vec<Value> =
        serde_json::from_str(json).map_err(|e| ReportError::parse(format!("source data: {e}")))?;

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).unwrap_or_else(|e| {
                warn!(index, error = %e, "unreadable source record, treating as vacant");
                SourceRecord::vacant()
            })
        })
        .collect())
}

/// Read and parse the source document at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_source(path: &Path) -> Result<Vec<SourceRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let records = parse_source(&content)?;
    info!(records = records.len(), "loaded source data");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::build_rows;
    use utilreport_shared::PersonSlot;

    #[test]
    fn parses_array_of_records() {
        let json = r#"[
            { "employees": { "firstname": "Ada", "lastname": "Lovelace", "status": "active" } },
            { "teams": [] }
        ]"#;
        let records = parse_source(json).expect("parse");
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].slot, PersonSlot::Employee(_)));
        assert_eq!(records[1].slot, PersonSlot::Vacant);
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse_source("[]").unwrap().is_empty());
    }

    #[test]
    fn non_array_document_is_a_parse_error() {
        let err = parse_source(r#"{ "employees": {} }"#).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
        assert!(err.to_string().contains("source data"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_source("[{").unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn bad_record_does_not_spoil_its_neighbours() {
        let json = r#"[
            { "employees": { "firstname": "Ada", "lastname": "Lovelace", "status": "active" } },
            { "employees": { "firstname": 42, "lastname": "Babbage", "status": "active" } },
            { "externals": {
                "firstname": "Grace",
                "lastname": "Hopper",
                "status": "active",
                "workforceUtilisation": { "utilisationRateYearToDate": true }
            } },
            17,
            "not a record"
        ]"#;
        let records = parse_source(json).expect("parse");
        assert_eq!(records.len(), 5);
        assert_eq!(records[3].slot, PersonSlot::Vacant);
        assert_eq!(records[4].slot, PersonSlot::Vacant);

        let rows = build_rows(&records);
        let people: Vec<&str> = rows.iter().map(|r| r.person.as_str()).collect();
        assert_eq!(people, vec!["Ada Lovelace", " Babbage", "Grace Hopper (External)"]);
        assert_eq!(rows[2].y2d, "—");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_source(Path::new("/nonexistent/source-data.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn loads_fixture() {
        let records = load_source(Path::new("../../../fixtures/json/source-data.fixture.json"))
            .expect("load fixture");
        assert_eq!(records.len(), 7);
    }
}
