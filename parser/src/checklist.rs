//! Checklist text parser.
//!
//! A pasted checklist has a fixed outline:
//!
//! ```text
//! <set name>
//! [<N> cards]
//! Parallels
//! <parallel name> /<print run>      (repeated)
//! <number> <player>, <team> [/<print run> | (NO BASE)]   (repeated)
//! [<sub-checklist header>
//!  <card lines>]                    (repeated)
//! ```
//!
//! The parser walks it once, top to bottom. Only a blank input and a missing
//! `Parallels` line are errors; every other unrecognized line is skipped and
//! recorded in [`ParseDiagnostics`].
//!
//! Sub-checklists list the cards of parallels that do not cover the whole
//! base set. Each header is matched to a declared parallel: an exact name
//! first, then the longest parallel name contained in the header, then the
//! first parallel whose name contains the header. Headers that match nothing
//! are kept as [`UnmatchedSection`]s.

use std::cmp::Reverse;

use checklist_core::{ParsedCard, ParsedParallel, ParsedSet, UnmatchedSection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::diagnostics::{LineRegion, ParseDiagnostics};
use crate::error::ParseError;
use crate::lines::{
    is_parallels_header, is_section_header, parse_card_line, parse_count_line,
    parse_parallel_line, parse_unnumbered_parallel, starts_card_line,
};
use crate::normalize::{IndexedLine, to_indexed_lines};

/// Parser behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Accept short digit-free lines in the parallel list as parallels
    /// without a print run (`Gold Vinyl`).
    pub accept_unnumbered_parallels: bool,
}

/// Sub-checklist collected from the card region.
#[derive(Debug)]
struct Section<'a> {
    header: &'a IndexedLine,
    cards: Vec<ParsedCard>,
}

/// Parser for pasted checklist text.
pub struct ChecklistParser {
    raw_text: String,
    options: ParseOptions,
    warnings: Vec<String>,
    diagnostics: ParseDiagnostics,
}

impl ChecklistParser {
    /// Creates a parser with default options.
    pub fn new(text: &str) -> Self {
        Self {
            raw_text: text.to_string(),
            options: ParseOptions::default(),
            warnings: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Replaces the parser options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses the checklist text into a [`ParsedSet`].
    ///
    /// # Errors
    ///
    /// [`ParseError::EmptyChecklist`] when the text has no non-blank lines,
    /// [`ParseError::NoParallelsSection`] when no `Parallels` line follows
    /// the header.
    pub fn parse(&mut self) -> Result<ParsedSet, ParseError> {
        self.warnings.clear();
        self.diagnostics = ParseDiagnostics::default();

        let raw_text = std::mem::take(&mut self.raw_text);
        let result = self.parse_lines(&to_indexed_lines(&raw_text));
        self.raw_text = raw_text;

        self.warnings.extend(self.diagnostics.warnings());
        result
    }

    fn parse_lines(&mut self, lines: &[IndexedLine]) -> Result<ParsedSet, ParseError> {
        let Some(header) = lines.first() else {
            return Err(ParseError::EmptyChecklist);
        };
        self.diagnostics.relevant_lines = lines.len();

        let mut set = ParsedSet::new(&header.text);
        self.diagnostics.recognize();

        let mut cursor = 1;
        if let Some(count) = lines.get(1).and_then(|line| parse_count_line(&line.text)) {
            set.expected_card_count = Some(count);
            self.diagnostics.recognize();
            cursor = 2;
        }

        let parallels_at = lines[cursor..]
            .iter()
            .position(|line| is_parallels_header(&line.text))
            .map(|offset| cursor + offset)
            .ok_or(ParseError::NoParallelsSection)?;
        for line in &lines[cursor..parallels_at] {
            debug!(line = line.line_number, text = %line.text, "Skipping preamble line");
            self.diagnostics
                .skip(line.line_number, &line.text, LineRegion::Preamble);
        }
        self.diagnostics.recognize();

        let list_start = parallels_at + 1;
        let cards_start = lines[list_start..]
            .iter()
            .position(|line| starts_card_line(&line.text))
            .map_or(lines.len(), |offset| list_start + offset);

        set.parallels = self.parse_parallel_list(&lines[list_start..cards_start]);
        let sections = self.parse_card_region(&lines[cards_start..], &mut set);
        self.attach_sections(&mut set, sections);

        info!(
            set = %set.set_name,
            parallels = set.parallels.len(),
            base_cards = set.base_cards.len(),
            unmatched_sections = set.unmatched_sections.len(),
            "Parsed checklist"
        );
        Ok(set)
    }

    fn parse_parallel_list(&mut self, lines: &[IndexedLine]) -> Vec<ParsedParallel> {
        let mut parallels = Vec::new();
        for line in lines {
            let parsed = parse_parallel_line(&line.text).or_else(|| {
                self.options
                    .accept_unnumbered_parallels
                    .then(|| parse_unnumbered_parallel(&line.text))
                    .flatten()
            });
            match parsed {
                Some(parallel) => {
                    self.diagnostics.recognize();
                    parallels.push(parallel);
                }
                None => {
                    debug!(line = line.line_number, text = %line.text, "Skipping unrecognized parallel line");
                    self.diagnostics
                        .skip(line.line_number, &line.text, LineRegion::Parallels);
                }
            }
        }
        parallels
    }

    /// Reads base cards up to the first sub-checklist header, then the
    /// sub-checklists themselves.
    fn parse_card_region<'a>(
        &mut self,
        lines: &'a [IndexedLine],
        set: &mut ParsedSet,
    ) -> Vec<Section<'a>> {
        let mut sections: Vec<Section<'a>> = Vec::new();

        for line in lines {
            if is_section_header(&line.text) {
                debug!(line = line.line_number, header = %line.text, "Opening sub-checklist");
                sections.push(Section {
                    header: line,
                    cards: Vec::new(),
                });
                continue;
            }

            let region = if sections.is_empty() {
                LineRegion::BaseCards
            } else {
                LineRegion::Section
            };

            let Some(card) = parse_card_line(&line.text) else {
                debug!(line = line.line_number, text = %line.text, "Skipping unrecognized card line");
                self.diagnostics.skip(line.line_number, &line.text, region);
                continue;
            };
            self.diagnostics.recognize();

            match sections.last_mut() {
                Some(section) => section.cards.push(card),
                None => {
                    if set.base_set_print_run.is_none() {
                        set.base_set_print_run = card.print_run.filter(|run| *run > 0);
                    }
                    set.base_cards.push(card);
                }
            }
        }

        sections
    }

    fn attach_sections(&mut self, set: &mut ParsedSet, sections: Vec<Section<'_>>) {
        for Section { header, cards } in sections {
            if cards.is_empty() {
                debug!(line = header.line_number, header = %header.text, "Sub-checklist has no cards");
                self.diagnostics
                    .skip(header.line_number, &header.text, LineRegion::Section);
                continue;
            }
            self.diagnostics.recognize();

            match match_parallel(&set.parallels, &header.text) {
                Some(index) => {
                    let parallel = &mut set.parallels[index];
                    debug!(header = %header.text, parallel = %parallel.name, cards = cards.len(), "Attached sub-checklist");
                    parallel.cards.get_or_insert_with(Vec::new).extend(cards);
                }
                None => {
                    warn!(header = %header.text, cards = cards.len(), "Sub-checklist matches no declared parallel");
                    self.warnings.push(format!(
                        "Sub-checklist '{}' ({} cards) matches no declared parallel",
                        header.text,
                        cards.len()
                    ));
                    set.unmatched_sections.push(UnmatchedSection {
                        header: header.text.clone(),
                        cards,
                    });
                }
            }
        }
    }

    /// Returns any warnings from the most recent parse call.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns diagnostics for the most recent parse call.
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }
}

/// Picks the parallel a sub-checklist header belongs to.
fn match_parallel(parallels: &[ParsedParallel], header: &str) -> Option<usize> {
    if let Some(index) = parallels.iter().position(|parallel| parallel.name == header) {
        return Some(index);
    }

    parallels
        .iter()
        .enumerate()
        .filter(|(_, parallel)| header.contains(parallel.name.as_str()))
        .max_by_key(|(index, parallel)| (parallel.name.len(), Reverse(*index)))
        .map(|(index, _)| index)
        .or_else(|| {
            parallels
                .iter()
                .position(|parallel| parallel.name.contains(header))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
Base Set
200 cards
Parallels
Gold /99
1 LeBron James, Los Angeles Lakers /145";

    #[test]
    fn test_minimal_checklist() {
        let set = ChecklistParser::new(MINIMAL).parse().unwrap();
        assert_eq!(set.set_name, "Base Set");
        assert_eq!(set.expected_card_count, Some(200));
        assert_eq!(set.base_set_print_run, Some(145));
        assert_eq!(set.parallels, vec![ParsedParallel::numbered("Gold", 99)]);
        assert_eq!(
            set.base_cards,
            vec![ParsedCard::new("1", "LeBron James", "Los Angeles Lakers").with_print_run(145)]
        );
    }

    #[test]
    fn test_empty_and_missing_parallels_errors() {
        assert!(matches!(
            ChecklistParser::new(" \n\t\n").parse(),
            Err(ParseError::EmptyChecklist)
        ));

        let err = ChecklistParser::new("Test Set\n200 cards\n1 Player Name, Team /100")
            .parse()
            .unwrap_err();
        assert!(err.to_string().contains("Parallels"));
    }

    #[test]
    fn test_count_line_only_checked_on_second_line() {
        let text = "Test Set\nParallels\n200 cards\n1 Player, Team /10";
        let mut parser = ChecklistParser::new(text);
        let set = parser.parse().unwrap();
        assert_eq!(set.expected_card_count, None);
        assert!(set.parallels.is_empty());
        assert_eq!(parser.diagnostics().skipped_lines[0].text, "200 cards");
        assert_eq!(parser.diagnostics().skipped_lines[0].region, LineRegion::Parallels);
    }

    #[test]
    fn test_set_name_line_is_never_the_parallels_header() {
        let err = ChecklistParser::new("Parallels\n1 Player, Team /10")
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::NoParallelsSection));
    }

    #[test]
    fn test_base_print_run_comes_from_first_numbered_card() {
        let text = "\
Set
Parallels
Gold /10
25 Joan Martinez, Real Madrid (NO BASE)
26 Player Two, Team /145
27 Player Three, Team /99";
        let set = ChecklistParser::new(text).parse().unwrap();
        assert_eq!(set.base_cards[0].print_run, None);
        assert_eq!(set.base_set_print_run, Some(145));
    }

    #[test]
    fn test_unnumbered_parallels_opt_in() {
        let text = "Set\nParallels\nGold Vinyl\nRed /5\n1 Player, Team";

        let default_set = ChecklistParser::new(text).parse().unwrap();
        assert_eq!(default_set.parallels.len(), 1);

        let set = ChecklistParser::new(text)
            .with_options(ParseOptions {
                accept_unnumbered_parallels: true,
            })
            .parse()
            .unwrap();
        assert_eq!(
            set.parallels,
            vec![
                ParsedParallel::unnumbered("Gold Vinyl"),
                ParsedParallel::numbered("Red", 5)
            ]
        );
    }

    #[test]
    fn test_sub_checklist_attaches_to_contained_parallel() {
        let text = "\
Dual Jersey Ink
Parallels
Electric Etch Orange /25
Electric Etch Red Pulsar /5
1 Player One, Team /99
2 Player Two, Team /99
Dual Jersey Ink Electric Etch Red Pulsar
2 Player Two, Team /5";
        let set = ChecklistParser::new(text).parse().unwrap();
        assert_eq!(set.base_cards.len(), 2);
        assert!(set.parallels[0].cards.is_none());
        assert_eq!(
            set.parallels[1].cards,
            Some(vec![ParsedCard::new("2", "Player Two", "Team").with_print_run(5)])
        );
    }

    #[test]
    fn test_section_match_prefers_longest_contained_name() {
        let parallels = vec![
            ParsedParallel::numbered("Electric Etch", 50),
            ParsedParallel::numbered("Electric Etch Orange", 25),
        ];
        assert_eq!(
            match_parallel(&parallels, "Dual Jersey Ink Electric Etch Orange"),
            Some(1)
        );
        assert_eq!(match_parallel(&parallels, "Electric Etch"), Some(0));
        assert_eq!(match_parallel(&parallels, "Etch Orange"), Some(1));
        assert_eq!(match_parallel(&parallels, "Mystery Finish Checklist"), None);
    }

    #[test]
    fn test_repeated_sections_append() {
        let text = "\
Set
Parallels
Gold Prizm Finish /10
1 Player One, Team /99
Gold Prizm Finish Part One
1 Player One, Team /10
Gold Prizm Finish Part Two
2 Player Two, Team /10";
        let set = ChecklistParser::new(text).parse().unwrap();
        let cards = set.parallels[0].cards.as_ref().unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_unmatched_and_empty_sections() {
        let text = "\
Set
Parallels
Gold /10
1 Player One, Team /99
Mystery Finish Checklist
3 Player Three, Team
Another Empty Header Here";
        let mut parser = ChecklistParser::new(text);
        let set = parser.parse().unwrap();

        assert!(set.parallels[0].cards.is_none());
        assert_eq!(set.unmatched_sections.len(), 1);
        assert_eq!(set.unmatched_sections[0].header, "Mystery Finish Checklist");

        let diagnostics = parser.diagnostics();
        assert_eq!(diagnostics.skipped_lines.len(), 1);
        assert_eq!(diagnostics.skipped_lines[0].text, "Another Empty Header Here");
        assert_eq!(
            diagnostics.recognized_lines + diagnostics.skipped_lines.len(),
            diagnostics.relevant_lines
        );
        assert!(parser.warnings().iter().any(|w| w.contains("Mystery Finish Checklist")));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let mut parser = ChecklistParser::new(MINIMAL);
        let first = parser.parse().unwrap();
        let second = parser.parse().unwrap();
        assert_eq!(first, second);
        assert_eq!(parser.diagnostics().relevant_lines, 5);
        assert_eq!(parser.diagnostics().recognized_lines, 5);
    }
}
