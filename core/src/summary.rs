//! Human-readable review summary of a parsed set.

use crate::ParsedSet;

/// Renders a parsed set as a multi-line review summary.
///
/// The output is a pure projection of `parsed`: set name, declared total,
/// base card count, base print run, then one line per parallel. A parallel
/// with its own checklist reports that list's size; a mirror parallel
/// reports the base card count.
///
/// # Examples
///
/// ```
/// use checklist_core::*;
///
/// let mut set = ParsedSet::new("Prizm Basketball");
/// set.expected_card_count = Some(200);
/// set.base_set_print_run = Some(145);
/// set.parallels.push(ParsedParallel::numbered("Gold", 10));
/// set.base_cards.push(ParsedCard::new("1", "LeBron James", "Lakers"));
///
/// let summary = generate_parse_summary(&set);
/// assert!(summary.contains("Total Cards: 200"));
/// assert!(summary.contains("  - Gold /10: 1 cards (mirrors base)"));
/// ```
pub fn generate_parse_summary(parsed: &ParsedSet) -> String {
    let mut out = String::new();
    let base_count = parsed.base_cards.len();

    // Zero carries no information for either field.
    let total = parsed
        .expected_card_count
        .filter(|count| *count > 0)
        .map_or_else(|| "Unknown".to_string(), |count| count.to_string());
    let base_print_run = parsed
        .base_set_print_run
        .filter(|run| *run > 0)
        .map_or_else(|| "Unlimited".to_string(), |run| format!("/{run}"));

    out.push_str(&format!("Set: {}\n", parsed.set_name));
    out.push_str(&format!("Total Cards: {total}\n"));
    out.push_str(&format!("Base Cards: {base_count}\n"));
    out.push_str(&format!("Base Print Run: {base_print_run}\n"));
    out.push_str(&format!("\nParallels: {}\n", parsed.parallels.len()));

    for parallel in &parsed.parallels {
        let label = match parallel.print_run {
            Some(run) => format!("{} /{run}", parallel.name),
            None => parallel.name.clone(),
        };
        let detail = if parallel.mirrors_base() {
            format!("{base_count} cards (mirrors base)")
        } else {
            format!("{} cards (custom checklist)", parallel.card_count(base_count))
        };
        out.push_str(&format!("  - {label}: {detail}\n"));
    }

    if !parsed.unmatched_sections.is_empty() {
        out.push_str(&format!(
            "\nUnmatched Sections: {}\n",
            parsed.unmatched_sections.len()
        ));
        for section in &parsed.unmatched_sections {
            out.push_str(&format!(
                "  - {}: {} cards\n",
                section.header,
                section.cards.len()
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::{ParsedCard, ParsedParallel, UnmatchedSection};

    use super::*;

    fn sample_set() -> ParsedSet {
        let mut set = ParsedSet::new("Prizm Basketball");
        set.expected_card_count = Some(200);
        set.base_set_print_run = Some(145);
        set.parallels.push(ParsedParallel::numbered("Gold", 10));
        set.parallels.push(
            ParsedParallel::numbered("Silver", 25).with_cards(vec![
                ParsedCard::new("1", "Player", "Team").with_print_run(25),
            ]),
        );
        set.base_cards
            .push(ParsedCard::new("1", "LeBron James", "Lakers").with_print_run(145));
        set.base_cards
            .push(ParsedCard::new("2", "Stephen Curry", "Warriors").with_print_run(145));
        set
    }

    #[test]
    fn test_summary_lists_header_fields_in_order() {
        let summary = generate_parse_summary(&sample_set());
        let expected = "\
Set: Prizm Basketball
Total Cards: 200
Base Cards: 2
Base Print Run: /145

Parallels: 2
  - Gold /10: 2 cards (mirrors base)
  - Silver /25: 1 cards (custom checklist)
";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_reports_unknown_total_and_unlimited_print_run() {
        let mut set = sample_set();
        set.expected_card_count = None;
        set.base_set_print_run = None;

        let summary = generate_parse_summary(&set);
        assert!(summary.contains("Total Cards: Unknown"));
        assert!(summary.contains("Base Print Run: Unlimited"));
    }

    #[test]
    fn test_summary_treats_zero_total_and_print_run_as_missing() {
        let mut set = sample_set();
        set.expected_card_count = Some(0);
        set.base_set_print_run = Some(0);

        let summary = generate_parse_summary(&set);
        assert!(summary.contains("Total Cards: Unknown\n"));
        assert!(summary.contains("Base Print Run: Unlimited\n"));
        assert!(!summary.contains("/0"));
    }

    #[test]
    fn test_summary_is_a_pure_projection() {
        let set = sample_set();
        assert_eq!(generate_parse_summary(&set), generate_parse_summary(&set));
    }

    #[test]
    fn test_unnumbered_parallel_has_no_print_run_suffix() {
        let mut set = sample_set();
        set.parallels = vec![ParsedParallel::unnumbered("Holo")];

        let summary = generate_parse_summary(&set);
        assert!(summary.contains("  - Holo: 2 cards (mirrors base)"));
    }

    #[test]
    fn test_summary_lists_unmatched_sections() {
        let mut set = sample_set();
        set.unmatched_sections.push(UnmatchedSection {
            header: "Mystery Finish Checklist".to_string(),
            cards: vec![ParsedCard::new("9", "Player", "Team")],
        });

        let summary = generate_parse_summary(&set);
        assert!(summary.ends_with("\nUnmatched Sections: 1\n  - Mystery Finish Checklist: 1 cards\n"));
    }
}
