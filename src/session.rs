//! Per-page session state: one `PanelSession` per analyzer page, owning the
//! form values, validation errors, the current report and the single-slot
//! in-flight submission guard. No state is shared across pages.

use std::collections::BTreeMap;

use crate::client::{AnalysisApi, ClientError};
use crate::models::{field_set, Field, InterpretationRecord, PanelType, Report};
use crate::report::{build_rows, build_summary, Row};
use crate::validate::{self, FormValues, ValidationErrors};

/// General error shown when the analysis request fails.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to send data to the backend.";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Form validation failed")]
    Invalid,

    #[error("A submission is already in progress")]
    InFlight,
}

/// Validated, parsed payload for one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub panel: PanelType,
    pub values: BTreeMap<String, f64>,
}

/// State machine behind one analyzer page.
///
/// Submission is split into `start_submission` (validate, parse, arm the
/// in-flight flag) and `finish_submission` (apply the outcome, clear the
/// flag) so that hosts performing the transport call elsewhere keep the
/// reject-while-busy guarantee. `submit` does both around a blocking call.
pub struct PanelSession {
    panel: PanelType,
    values: FormValues,
    errors: ValidationErrors,
    report: Option<Report>,
    history: Vec<FormValues>,
    in_flight: bool,
}

impl PanelSession {
    pub fn new(panel: PanelType) -> Self {
        Self {
            panel,
            values: validate::empty_values(field_set(panel)),
            errors: ValidationErrors::default(),
            report: None,
            history: Vec::new(),
            in_flight: false,
        }
    }

    pub fn panel(&self) -> PanelType {
        self.panel
    }

    pub fn fields(&self) -> &'static [Field] {
        field_set(self.panel)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn report(&self) -> Option<&[InterpretationRecord]> {
        self.report.as_deref()
    }

    pub fn history(&self) -> &[FormValues] {
        &self.history
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Apply one keystroke's worth of input to a field.
    pub fn edit(&mut self, key: &str, raw: &str) -> bool {
        validate::on_field_change(&mut self.values, &mut self.errors, key, raw)
    }

    /// Validate the form and produce the request payload, arming the
    /// in-flight guard. Fails with `InFlight` until the previous submission
    /// settles, and with `Invalid` (errors recorded on the session) when the
    /// form is incomplete or a value does not parse to a finite number.
    pub fn start_submission(&mut self) -> Result<AnalysisRequest, SubmitError> {
        if self.in_flight {
            tracing::debug!(panel = %self.panel.as_str(), "submission rejected: already in flight");
            return Err(SubmitError::InFlight);
        }

        let errors = validate::validate_complete(self.fields(), &self.values);
        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitError::Invalid);
        }

        match validate::parse_values(self.fields(), &self.values) {
            Ok(values) => {
                self.in_flight = true;
                Ok(AnalysisRequest {
                    panel: self.panel,
                    values,
                })
            }
            Err(errors) => {
                self.errors = errors;
                Err(SubmitError::Invalid)
            }
        }
    }

    /// Apply the outcome of a submission and release the in-flight guard.
    ///
    /// Success replaces the report and clears all errors. Failure records
    /// only the general error message; an existing report stays visible.
    pub fn finish_submission(&mut self, result: Result<Vec<InterpretationRecord>, ClientError>) {
        self.in_flight = false;
        match result {
            Ok(records) => {
                self.report = Some(records);
                self.errors = ValidationErrors::default();
            }
            Err(e) => {
                tracing::warn!(
                    panel = %self.panel.as_str(),
                    error = %e,
                    "analysis submission failed"
                );
                self.errors = ValidationErrors::general(SUBMIT_FAILED_MESSAGE);
            }
        }
    }

    /// Validate, submit through the given client and apply the result.
    pub fn submit(&mut self, api: &impl AnalysisApi) -> Result<(), SubmitError> {
        let request = self.start_submission()?;
        let result = api.analyze(request.panel, &request.values);
        self.finish_submission(result);
        Ok(())
    }

    /// Snapshot the current (complete) form values into the in-memory
    /// history list. Returns whether the snapshot was taken.
    pub fn save_to_history(&mut self) -> bool {
        let errors = validate::validate_complete(self.fields(), &self.values);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.history.push(self.values.clone());
        true
    }

    /// Report-table rows for the current state.
    pub fn rows(&self) -> Vec<Row> {
        build_rows(self.fields(), &self.values, self.report.as_deref())
    }

    /// Summary bullet texts, empty before the first successful submission.
    pub fn summary(&self) -> Vec<&str> {
        self.report.as_deref().map(build_summary).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockAnalysisClient;
    use crate::models::ResultValue;

    fn record(test: &str, color: &str, text: &str) -> InterpretationRecord {
        InterpretationRecord {
            test: test.into(),
            expected_range: String::new(),
            result: ResultValue::Number(0.0),
            text: text.into(),
            color: color.into(),
        }
    }

    fn fbc_report() -> Vec<InterpretationRecord> {
        vec![
            record("whiteBloodCells", "green", "WBC normal."),
            record("redBloodCells", "green", "RBC normal."),
            record("hemoglobin", "green", "Hemoglobin normal."),
            record("platelets", "red", "Platelets high."),
        ]
    }

    fn filled_session() -> PanelSession {
        let mut session = PanelSession::new(PanelType::Fbc);
        session.edit("whiteBloodCells", "7.2");
        session.edit("redBloodCells", "5.0");
        session.edit("hemoglobin", "150");
        session.edit("platelets", "300");
        session
    }

    // ── Full pipeline ───────────────────────────────────────────────

    #[test]
    fn fbc_submission_produces_full_report() {
        let mut session = filled_session();
        let client = MockAnalysisClient::new(fbc_report());

        session.submit(&client).unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.len(), 4);

        let rows = session.rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].display_value, "7.2 x 10⁹/L");
        assert_eq!(rows[0].status_color.as_deref(), Some("green"));
        assert_eq!(
            session.summary(),
            ["WBC normal.", "RBC normal.", "Hemoglobin normal.", "Platelets high."]
        );
        assert!(session.errors().is_empty());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn new_session_starts_blank() {
        let session = PanelSession::new(PanelType::LipidPanel);
        assert!(session.report().is_none());
        assert!(session.errors().is_empty());
        assert!(session.summary().is_empty());
        assert!(session.values().values().all(String::is_empty));
    }

    // ── Validation gating ───────────────────────────────────────────

    #[test]
    fn empty_field_blocks_submission() {
        let mut session = filled_session();
        session.edit("whiteBloodCells", "");
        let client = MockAnalysisClient::new(fbc_report());

        let err = session.submit(&client).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid));
        assert_eq!(
            session.errors().fields["whiteBloodCells"],
            "whiteBloodCells cannot be empty."
        );
        assert!(session.report().is_none());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn rejected_keystroke_leaves_value_and_sets_error() {
        let mut session = filled_session();
        assert!(!session.edit("whiteBloodCells", "12.5.3"));
        assert_eq!(session.values()["whiteBloodCells"], "7.2");
        assert_eq!(
            session.errors().fields["whiteBloodCells"],
            "whiteBloodCells must be a valid number."
        );
    }

    #[test]
    fn unparsable_value_blocks_submission() {
        let mut session = filled_session();
        session.edit("hemoglobin", ".");

        let err = session.start_submission().unwrap_err();
        assert!(matches!(err, SubmitError::Invalid));
        assert_eq!(
            session.errors().fields["hemoglobin"],
            "hemoglobin must be a valid number."
        );
        assert!(!session.is_in_flight());
    }

    // ── Request failure ─────────────────────────────────────────────

    #[test]
    fn failed_request_sets_general_error_only() {
        let mut session = filled_session();
        let client = MockAnalysisClient::failing("connection refused");

        session.submit(&client).unwrap();

        assert_eq!(
            session.errors().general.as_deref(),
            Some(SUBMIT_FAILED_MESSAGE)
        );
        assert!(session.errors().fields.is_empty());
        assert!(session.report().is_none());
    }

    #[test]
    fn failed_request_preserves_prior_report() {
        let mut session = filled_session();
        session.submit(&MockAnalysisClient::new(fbc_report())).unwrap();
        assert!(session.report().is_some());

        session
            .submit(&MockAnalysisClient::failing("connection refused"))
            .unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.len(), 4);
        assert_eq!(
            session.errors().general.as_deref(),
            Some(SUBMIT_FAILED_MESSAGE)
        );
    }

    #[test]
    fn successful_resubmission_replaces_report_and_clears_errors() {
        let mut session = filled_session();
        session
            .submit(&MockAnalysisClient::failing("connection refused"))
            .unwrap();
        assert!(session.errors().general.is_some());

        let mut second = fbc_report();
        second.truncate(2);
        session.submit(&MockAnalysisClient::new(second)).unwrap();

        assert_eq!(session.report().unwrap().len(), 2);
        assert!(session.errors().is_empty());
    }

    // ── In-flight guard ─────────────────────────────────────────────

    #[test]
    fn double_start_rejected_while_in_flight() {
        let mut session = filled_session();
        let request = session.start_submission().unwrap();
        assert_eq!(request.panel, PanelType::Fbc);
        assert_eq!(request.values["whiteBloodCells"], 7.2);
        assert!(session.is_in_flight());

        let err = session.start_submission().unwrap_err();
        assert!(matches!(err, SubmitError::InFlight));
    }

    #[test]
    fn finish_releases_guard_for_next_submission() {
        let mut session = filled_session();
        let _ = session.start_submission().unwrap();
        session.finish_submission(Ok(fbc_report()));
        assert!(!session.is_in_flight());
        assert!(session.start_submission().is_ok());
    }

    #[test]
    fn failed_finish_also_releases_guard() {
        let mut session = filled_session();
        let _ = session.start_submission().unwrap();
        session.finish_submission(Err(crate::client::ClientError::Transport(
            "reset by peer".into(),
        )));
        assert!(!session.is_in_flight());
        assert!(session.start_submission().is_ok());
    }

    // ── History ─────────────────────────────────────────────────────

    #[test]
    fn save_to_history_snapshots_complete_form() {
        let mut session = filled_session();
        assert!(session.save_to_history());
        session.edit("hemoglobin", "120");
        assert!(session.save_to_history());

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0]["hemoglobin"], "150");
        assert_eq!(session.history()[1]["hemoglobin"], "120");
    }

    #[test]
    fn save_to_history_rejects_incomplete_form() {
        let mut session = PanelSession::new(PanelType::LiverFunction);
        assert!(!session.save_to_history());
        assert!(session.history().is_empty());
        assert!(!session.errors().is_empty());
    }
}
