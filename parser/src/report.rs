//! Structured parse reporting.

use checklist_core::{ParsedSet, validation_messages};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{ParseDiagnostics, SkippedLine};
use crate::error::ParseError;

/// Parse outcome together with its report.
#[derive(Debug)]
pub struct ChecklistRun {
    pub result: Result<ParsedSet, ParseError>,
    pub report: ChecklistReport,
}

/// Per-checklist parse report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    /// Where the checklist came from (file name), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub set_name: Option<String>,
    /// Parsed without structural errors and passed validation.
    pub success: bool,
    /// Structured code of the structural error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human-readable structural error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub expected_card_count: Option<u32>,
    pub base_card_count: usize,
    pub parallel_count: usize,
    pub custom_checklist_count: usize,
    pub unmatched_section_count: usize,
    pub coverage: f64,
    pub relevant_lines: usize,
    pub recognized_lines: usize,
    pub skipped_lines: Vec<SkippedLine>,
    pub warnings: Vec<String>,
    pub validation_errors: Vec<String>,
}

impl ChecklistReport {
    pub(crate) fn new(
        result: &Result<ParsedSet, ParseError>,
        diagnostics: &ParseDiagnostics,
        warnings: &[String],
    ) -> Self {
        let mut report = Self {
            source: None,
            set_name: None,
            success: false,
            error_code: None,
            error: None,
            expected_card_count: None,
            base_card_count: 0,
            parallel_count: 0,
            custom_checklist_count: 0,
            unmatched_section_count: 0,
            coverage: diagnostics.coverage(),
            relevant_lines: diagnostics.relevant_lines,
            recognized_lines: diagnostics.recognized_lines,
            skipped_lines: diagnostics.skipped_lines.clone(),
            warnings: warnings.to_vec(),
            validation_errors: Vec::new(),
        };

        match result {
            Ok(set) => {
                report.set_name = Some(set.set_name.clone());
                report.expected_card_count = set.expected_card_count;
                report.base_card_count = set.base_cards.len();
                report.parallel_count = set.parallels.len();
                report.custom_checklist_count = set
                    .parallels
                    .iter()
                    .filter(|parallel| !parallel.mirrors_base())
                    .count();
                report.unmatched_section_count = set.unmatched_sections.len();
                report.validation_errors = validation_messages(set);
                report.success = report.validation_errors.is_empty();
            }
            Err(err) => {
                report.error_code = Some(err.code().to_string());
                report.error = Some(err.to_string());
            }
        }

        report
    }

    /// Tags the report with its input source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Reports for a batch of checklists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReportBundle {
    /// RFC 3339 timestamp of the batch run.
    pub generated_at: String,
    pub total: usize,
    pub succeeded: usize,
    pub reports: Vec<ChecklistReport>,
}

impl ChecklistReportBundle {
    pub fn new(generated_at: impl Into<String>, reports: Vec<ChecklistReport>) -> Self {
        Self {
            generated_at: generated_at.into(),
            total: reports.len(),
            succeeded: reports.iter().filter(|report| report.success).count(),
            reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use checklist_core::{ParsedCard, ParsedParallel};

    use super::*;

    fn parsed() -> ParsedSet {
        let mut set = ParsedSet::new("Kaboom");
        set.parallels.push(ParsedParallel::numbered("Gold", 10));
        set.parallels.push(
            ParsedParallel::numbered("Red", 5).with_cards(vec![ParsedCard::new("1", "A", "B")]),
        );
        set.base_cards.push(ParsedCard::new("1", "A", "B"));
        set
    }

    #[test]
    fn test_report_counts_from_parsed_set() {
        let diagnostics = ParseDiagnostics {
            relevant_lines: 6,
            recognized_lines: 6,
            skipped_lines: Vec::new(),
        };
        let report = ChecklistReport::new(&Ok(parsed()), &diagnostics, &[]);
        assert!(report.success);
        assert_eq!(report.set_name.as_deref(), Some("Kaboom"));
        assert_eq!(report.parallel_count, 2);
        assert_eq!(report.custom_checklist_count, 1);
        assert_eq!(report.coverage, 1.0);
    }

    #[test]
    fn test_validation_errors_fail_report() {
        let mut set = parsed();
        set.base_cards.clear();
        let report = ChecklistReport::new(&Ok(set), &ParseDiagnostics::default(), &[]);
        assert!(!report.success);
        assert_eq!(report.validation_errors, vec!["No base cards found"]);
    }

    #[test]
    fn test_structural_error_report() {
        let report = ChecklistReport::new(
            &Err(ParseError::NoParallelsSection),
            &ParseDiagnostics::default(),
            &[],
        )
        .with_source("broken.txt");
        assert!(!report.success);
        assert_eq!(report.error_code.as_deref(), Some("no_parallels_section"));
        assert_eq!(report.source.as_deref(), Some("broken.txt"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["error"], "No \"Parallels\" section found");
    }

    #[test]
    fn test_bundle_counts_successes() {
        let ok = ChecklistReport::new(&Ok(parsed()), &ParseDiagnostics::default(), &[]);
        let failed =
            ChecklistReport::new(&Err(ParseError::EmptyChecklist), &ParseDiagnostics::default(), &[]);
        let bundle = ChecklistReportBundle::new("2024-01-01T00:00:00+00:00", vec![ok, failed]);
        assert_eq!(bundle.total, 2);
        assert_eq!(bundle.succeeded, 1);
    }
}
