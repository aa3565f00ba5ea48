//! Line coverage diagnostics for a parse run.

use serde::{Deserialize, Serialize};

/// Part of the checklist a line was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRegion {
    /// Between the set header and the `Parallels` line.
    Preamble,
    /// The parallel list after `Parallels`.
    Parallels,
    /// Base card lines.
    BaseCards,
    /// A parallel-specific sub-checklist.
    Section,
}

/// A line no recognizer accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the raw input.
    pub line_number: usize,
    pub text: String,
    pub region: LineRegion,
}

/// Diagnostics for a single parse run.
///
/// Every non-blank line is either recognized or skipped, so
/// `recognized_lines + skipped_lines.len() == relevant_lines`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    pub relevant_lines: usize,
    pub recognized_lines: usize,
    pub skipped_lines: Vec<SkippedLine>,
}

impl ParseDiagnostics {
    /// Share of relevant lines that were recognized, `0.0` for empty input.
    pub fn coverage(&self) -> f64 {
        if self.relevant_lines == 0 {
            return 0.0;
        }
        self.recognized_lines as f64 / self.relevant_lines as f64
    }

    pub(crate) fn recognize(&mut self) {
        self.recognized_lines += 1;
    }

    pub(crate) fn skip(&mut self, line_number: usize, text: &str, region: LineRegion) {
        self.skipped_lines.push(SkippedLine {
            line_number,
            text: text.to_string(),
            region,
        });
    }

    /// Warning lines summarizing what was skipped.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let count = |region: LineRegion| {
            self.skipped_lines
                .iter()
                .filter(|line| line.region == region)
                .count()
        };

        for (region, label) in [
            (LineRegion::Preamble, "before the Parallels header"),
            (LineRegion::Parallels, "in the parallel list"),
            (LineRegion::BaseCards, "among base cards"),
            (LineRegion::Section, "in parallel sub-checklists"),
        ] {
            let skipped = count(region);
            if skipped > 0 {
                warnings.push(format!("Skipped {skipped} unrecognized lines {label}"));
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_of_empty_run_is_zero() {
        assert_eq!(ParseDiagnostics::default().coverage(), 0.0);
    }

    #[test]
    fn test_coverage_ratio() {
        let mut diagnostics = ParseDiagnostics {
            relevant_lines: 4,
            ..Default::default()
        };
        diagnostics.recognize();
        diagnostics.recognize();
        diagnostics.recognize();
        diagnostics.skip(3, "???", LineRegion::Parallels);
        assert_eq!(diagnostics.coverage(), 0.75);
    }

    #[test]
    fn test_warnings_grouped_by_region() {
        let mut diagnostics = ParseDiagnostics::default();
        diagnostics.skip(2, "Released 2024", LineRegion::Preamble);
        diagnostics.skip(5, "see below", LineRegion::BaseCards);
        diagnostics.skip(6, "n/a", LineRegion::BaseCards);

        assert_eq!(
            diagnostics.warnings(),
            vec![
                "Skipped 1 unrecognized lines before the Parallels header".to_string(),
                "Skipped 2 unrecognized lines among base cards".to_string(),
            ]
        );
    }
}
