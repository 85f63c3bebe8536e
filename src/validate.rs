//! Form-input validation: the per-keystroke numeric filter, the pre-submit
//! completeness check, and the numeric parse that gates submission.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Field;

/// Pattern for numeric text, including intermediate typing states: an
/// optional run of digits, optionally a decimal point, optionally more
/// digits. Matches "", "12", "12." and ".5".
static NUMERIC_INPUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d*\.?\d*$").unwrap());

/// Raw per-field input, keyed by `Field::key`. Values may be empty or
/// partially-typed numeric text; iteration order is never relied on
/// (the field schema drives ordering).
pub type FormValues = BTreeMap<String, String>;

/// Validation state for one form: per-field messages plus a request-level
/// slot. Fully replaced on every recompute, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
    pub general: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    /// Request-level failure with no specific field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: Some(message.into()),
        }
    }
}

/// All-empty form values for a field schema.
pub fn empty_values(fields: &[Field]) -> FormValues {
    fields
        .iter()
        .map(|f| (f.key.to_string(), String::new()))
        .collect()
}

/// Whether raw text is acceptable form input (valid number or a valid
/// intermediate state while typing one).
pub fn is_numeric_input(raw: &str) -> bool {
    NUMERIC_INPUT.is_match(raw)
}

/// Apply one edit to a field.
///
/// Accepted input is stored verbatim (including "" and trailing-dot states)
/// and clears the field's error. Rejected input is dropped — the stored
/// value stays at the last accepted state — and sets a field error naming
/// the field. Returns whether the edit was accepted.
pub fn on_field_change(
    values: &mut FormValues,
    errors: &mut ValidationErrors,
    key: &str,
    raw: &str,
) -> bool {
    if is_numeric_input(raw) {
        values.insert(key.to_string(), raw.to_string());
        errors.fields.remove(key);
        true
    } else {
        errors
            .fields
            .insert(key.to_string(), format!("{key} must be a valid number."));
        false
    }
}

/// Pre-submit completeness check: one error per empty field, in schema order.
pub fn validate_complete(fields: &[Field], values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in fields {
        let raw = values.get(field.key).map(String::as_str).unwrap_or("");
        if raw.is_empty() {
            errors
                .fields
                .insert(field.key.to_string(), format!("{} cannot be empty.", field.key));
        }
    }
    errors
}

/// Parse every field to a finite f64, or report which fields failed.
///
/// This is the explicit not-a-number gate: values stuck in an intermediate
/// state that the keystroke filter allowed (a bare "." for example) block
/// submission here instead of being forwarded as NaN.
pub fn parse_values(
    fields: &[Field],
    values: &FormValues,
) -> Result<BTreeMap<String, f64>, ValidationErrors> {
    let mut parsed = BTreeMap::new();
    let mut errors = ValidationErrors::default();

    for field in fields {
        let raw = values.get(field.key).map(String::as_str).unwrap_or("");
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                parsed.insert(field.key.to_string(), value);
            }
            _ => {
                errors
                    .fields
                    .insert(field.key.to_string(), format!("{} must be a valid number.", field.key));
            }
        }
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}
