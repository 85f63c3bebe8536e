use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::enums::StatusColor;

/// Result value reported back by the analysis service: numeric for most
/// tests, free text for qualitative results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(f64),
    Text(String),
}

/// One server-returned classification of a single test result.
///
/// Received as an ordered JSON array; treated as read-only display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationRecord {
    /// Test identifier; matches a `Field::key` when the backend is well-behaved.
    pub test: String,
    pub expected_range: String,
    pub result: ResultValue,
    /// Human-readable summary sentence for the analysis summary section.
    pub text: String,
    /// Status color as sent on the wire ("red" | "green" | "blue").
    pub color: String,
}

impl InterpretationRecord {
    /// Parsed status color, when the service sent one of the known values.
    pub fn status(&self) -> Option<StatusColor> {
        StatusColor::from_str(&self.color).ok()
    }
}

/// The ordered interpretation records for one submission.
pub type Report = Vec<InterpretationRecord>;
