//! Structural parse failures.

use thiserror::Error;

/// Errors that stop a checklist from being parsed at all.
///
/// Lines that fail to match a card or parallel pattern are not errors; they
/// are recorded in [`ParseDiagnostics`](crate::ParseDiagnostics) instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input contained no non-blank lines.
    #[error("Empty checklist text")]
    EmptyChecklist,

    /// No line equal to `Parallels` followed the set header.
    #[error("No \"Parallels\" section found")]
    NoParallelsSection,

    /// CSV input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// CSV header row lacks a required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

impl ParseError {
    /// Stable snake_case code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyChecklist => "empty_checklist",
            Self::NoParallelsSection => "no_parallels_section",
            Self::Csv(_) => "csv",
            Self::MissingColumn(_) => "missing_column",
        }
    }
}
