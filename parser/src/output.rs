//! Output formatting for parsed sets and reports.

use checklist_core::{ParsedSet, generate_parse_summary};

use crate::report::ChecklistReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Summary,
}

/// Formats a parsed set in the requested output format.
pub fn format_parsed_set(set: &ParsedSet, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(set)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(set).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Summary => Ok(generate_parse_summary(set)),
    }
}

/// Formats several parsed sets; summaries are separated by a blank line.
pub fn format_parsed_sets(sets: &[ParsedSet], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(sets)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(sets).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Summary => Ok(sets
            .iter()
            .map(generate_parse_summary)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ChecklistReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Summary => Ok(report_to_summary(report)),
    }
}

fn report_to_summary(report: &ChecklistReport) -> String {
    let mut out = String::new();

    let status = if report.success { "OK" } else { "FAILED" };
    match (&report.source, &report.set_name) {
        (Some(source), Some(name)) => out.push_str(&format!("{status}  {name} ({source})\n")),
        (None, Some(name)) => out.push_str(&format!("{status}  {name}\n")),
        (Some(source), None) => out.push_str(&format!("{status}  {source}\n")),
        (None, None) => out.push_str(&format!("{status}\n")),
    }

    if let Some(ref error) = report.error {
        out.push_str(&format!("  Error: {error}\n"));
        return out;
    }

    out.push_str(&format!(
        "  Coverage: {:.0}% ({}/{} lines)\n",
        report.coverage * 100.0,
        report.recognized_lines,
        report.relevant_lines
    ));
    out.push_str(&format!(
        "  Base cards: {}  Parallels: {} ({} custom)\n",
        report.base_card_count, report.parallel_count, report.custom_checklist_count
    ));

    for error in &report.validation_errors {
        out.push_str(&format!("  Invalid: {error}\n"));
    }
    for warning in &report.warnings {
        out.push_str(&format!("  Warning: {warning}\n"));
    }
    for line in &report.skipped_lines {
        out.push_str(&format!("  Skipped line {}: {}\n", line.line_number, line.text));
    }

    out
}

#[cfg(test)]
mod tests {
    use checklist_core::{ParsedCard, ParsedParallel};

    use super::*;
    use crate::parse_checklist_with_report;
    use crate::ParseOptions;

    fn sample() -> ParsedSet {
        let mut set = ParsedSet::new("Kaboom");
        set.parallels.push(ParsedParallel::numbered("Gold", 10));
        set.base_cards.push(ParsedCard::new("1", "Jude Bellingham", "Real Madrid"));
        set
    }

    #[test]
    fn test_json_uses_snake_case_fields() {
        let json = format_parsed_set(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["set_name"], "Kaboom");
        assert_eq!(value["parallels"][0]["print_run"], 10);
        assert!(value["parallels"][0]["cards"].is_null());
    }

    #[test]
    fn test_yaml_round_trips() {
        let yaml = format_parsed_set(&sample(), OutputFormat::Yaml).unwrap();
        let back: ParsedSet = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_summary_format_matches_core_summary() {
        let summary = format_parsed_set(&sample(), OutputFormat::Summary).unwrap();
        assert_eq!(summary, generate_parse_summary(&sample()));
    }

    #[test]
    fn test_multiple_summaries_separated() {
        let sets = vec![sample(), sample()];
        let summary = format_parsed_sets(&sets, OutputFormat::Summary).unwrap();
        assert_eq!(summary.matches("Set: Kaboom").count(), 2);
        assert!(summary.contains("\n\nSet: Kaboom"));
    }

    #[test]
    fn test_report_summary_lists_skipped_lines() {
        let run = parse_checklist_with_report(
            "Kaboom\nParallels\nGold /10\n???\n1 Player, Team",
            ParseOptions::default(),
        );
        let text = format_report(&run.report, OutputFormat::Summary).unwrap();
        assert!(text.starts_with("OK  Kaboom\n"));
        assert!(text.contains("Skipped line 4: ???"));
    }

    #[test]
    fn test_report_summary_for_failure() {
        let run = parse_checklist_with_report("", ParseOptions::default());
        let text = format_report(&run.report, OutputFormat::Summary).unwrap();
        assert_eq!(text, "FAILED\n  Error: Empty checklist text\n");
    }
}
