//! Trading-card checklist parsing.
//!
//! Turns the loosely formatted checklist text collectors paste from release
//! announcements into a [`ParsedSet`]: the set name, declared card count,
//! parallel list with print runs, base cards, and any parallel-specific
//! sub-checklists. CSV checklist exports are read into the same shape.
//!
//! # Main entry points
//!
//! - [`parse_checklist_text`]: parse pasted text.
//! - [`parse_checklist_with_report`]: same, with line coverage diagnostics
//!   and validation results in a serializable [`ChecklistReport`].
//! - [`parse_checklist_csv`]: fold a CSV export into one set per base set.
//!
//! # Example
//!
//! ```
//! use checklist_parser::parse_checklist_text;
//!
//! let text = "\
//! Base Set
//! 200 cards
//! Parallels
//! Gold /99
//! Electric Etch Red Pulsar /44
//! 1 LeBron James, Los Angeles Lakers /145
//! 2 Stephen Curry, Golden State Warriors /145
//! ";
//!
//! let set = parse_checklist_text(text).unwrap();
//! assert_eq!(set.set_name, "Base Set");
//! assert_eq!(set.expected_card_count, Some(200));
//! assert_eq!(set.parallels[1].name, "Electric Etch Red Pulsar");
//! assert_eq!(set.base_set_print_run, Some(145));
//! ```
//!
//! [`ParsedSet`]: checklist_core::ParsedSet

mod checklist;
mod csv_import;
mod diagnostics;
mod error;
mod lines;
mod normalize;
pub mod output;
mod report;

use checklist_core::ParsedSet;

pub use checklist::{ChecklistParser, ParseOptions};
pub use csv_import::parse_checklist_csv;
pub use diagnostics::{LineRegion, ParseDiagnostics, SkippedLine};
pub use error::ParseError;
pub use lines::{is_section_header, parse_card_line, parse_parallel_line};
pub use report::{ChecklistReport, ChecklistReportBundle, ChecklistRun};

/// Parses checklist text with default options.
///
/// # Errors
///
/// Fails only when the text is blank or has no `Parallels` line; see
/// [`ParseError`].
///
/// # Examples
///
/// ```
/// use checklist_parser::parse_checklist_text;
///
/// let err = parse_checklist_text("Test Set\n200 cards\n1 Player Name, Team /100").unwrap_err();
/// assert!(err.to_string().contains("Parallels"));
/// ```
pub fn parse_checklist_text(text: &str) -> Result<ParsedSet, ParseError> {
    ChecklistParser::new(text).parse()
}

/// Parses checklist text and builds a [`ChecklistReport`].
///
/// The report carries line coverage, skipped lines, parser warnings and
/// validation messages. It is produced for failed parses as well.
///
/// # Examples
///
/// ```
/// use checklist_parser::{ParseOptions, parse_checklist_with_report};
///
/// let text = "Kaboom\nParallels\nGold /10\nsee back of box\n1 Player, Team";
/// let run = parse_checklist_with_report(text, ParseOptions::default());
/// assert!(run.result.is_ok());
/// assert!(run.report.success);
/// assert_eq!(run.report.skipped_lines.len(), 1);
/// assert!(run.report.coverage < 1.0);
/// ```
pub fn parse_checklist_with_report(text: &str, options: ParseOptions) -> ChecklistRun {
    let mut parser = ChecklistParser::new(text).with_options(options);
    let result = parser.parse();
    let report = ChecklistReport::new(&result, parser.diagnostics(), parser.warnings());
    ChecklistRun { result, report }
}
