//! Report data binding: joins the static field schema, the raw form values
//! and the returned interpretation records into renderable rows. Layout and
//! styling stay in the host UI.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{Field, InterpretationRecord, StatusColor};
use crate::validate::FormValues;

/// Fixed legend shown under every report table, independent of data.
pub const STATUS_LEGEND: [StatusColor; 3] =
    [StatusColor::Red, StatusColor::Green, StatusColor::Blue];

/// One report-table row: static field metadata joined with the submitted
/// value and the matching record's status color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub expected_range: String,
    /// Raw submitted value with the field's unit appended, e.g. "7.2 x 10⁹/L".
    pub display_value: String,
    /// Color from the bound record; None when no record matched the field.
    pub status_color: Option<String>,
}

/// Patient identity stamped on the report header when enrichment succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub full_name: String,
    pub email: String,
    pub date: NaiveDate,
}

impl ReportHeader {
    pub fn new(full_name: String, email: String) -> Self {
        Self {
            full_name,
            email,
            date: Local::now().date_naive(),
        }
    }
}

/// Build one row per field, binding interpretation records to fields.
///
/// A record is bound by its `test` key when it names a field; records
/// without a usable key fall back to the field at the same index, matching
/// the order invariant of the backend's responses. A report shorter than the
/// field schema leaves the unmatched trailing fields with a blank status.
pub fn build_rows(
    fields: &[Field],
    values: &FormValues,
    report: Option<&[InterpretationRecord]>,
) -> Vec<Row> {
    let records = report.unwrap_or(&[]);

    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let record = records
                .iter()
                .find(|r| r.test == field.key)
                .or_else(|| records.get(index));
            let raw = values.get(field.key).map(String::as_str).unwrap_or("");

            Row {
                label: field.label.to_string(),
                expected_range: field.expected_range.to_string(),
                display_value: format!("{raw} {}", field.unit),
                status_color: record.map(|r| r.color.clone()),
            }
        })
        .collect()
}

/// Summary bullet texts in received order, one per record.
pub fn build_summary(report: &[InterpretationRecord]) -> Vec<&str> {
    report.iter().map(|r| r.text.as_str()).collect()
}
