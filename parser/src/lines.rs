//! Single-line recognizers for checklist text.
//!
//! Each function looks at one trimmed line and either recognizes it or
//! returns `None`/`false`. None of them fail: a line that matches nothing is
//! simply left for the caller to record as skipped.

use std::sync::LazyLock;

use checklist_core::{ParsedCard, ParsedParallel};
use regex::Regex;

/// Compiled line patterns.
static PATTERNS: LazyLock<LinePatterns> = LazyLock::new(LinePatterns::new);

struct LinePatterns {
    card: Regex,
    card_start: Regex,
    parallel: Regex,
    count: Regex,
    leading_number: Regex,
    trailing_print_run: Regex,
}

impl LinePatterns {
    fn new() -> Self {
        Self {
            // 1 Jude Bellingham, Real Madrid /145
            // 25 Joan Martinez, Real Madrid (NO BASE)
            card: Regex::new(r"^([0-9]+)\s+(.+?),\s+(.+?)(?:\s+/([0-9]+)|\s+\(NO BASE\))?$")
                .expect("static regex must compile"),
            card_start: Regex::new(r"^[0-9]+\s+\p{Lu}").expect("static regex must compile"),
            // Electric Etch Red Pulsar /44
            parallel: Regex::new(r"^(.+?)\s+/([0-9]+)$").expect("static regex must compile"),
            // 200 cards
            count: Regex::new(r"(?i)^([0-9]+)\s+cards?$").expect("static regex must compile"),
            leading_number: Regex::new(r"^[0-9]+\s").expect("static regex must compile"),
            trailing_print_run: Regex::new(r"/[0-9]+$").expect("static regex must compile"),
        }
    }
}

/// Minimum word count of a sub-checklist header.
const MIN_HEADER_WORDS: usize = 3;

/// Maximum word count of an unnumbered parallel name.
const MAX_UNNUMBERED_PARALLEL_WORDS: usize = 4;

/// Parses `NUMBER PLAYER, TEAM [/PRINTRUN | (NO BASE)]`.
///
/// # Examples
///
/// ```
/// use checklist_parser::parse_card_line;
///
/// let card = parse_card_line("1 Jude Bellingham, Real Madrid /145").unwrap();
/// assert_eq!(card.player_name, "Jude Bellingham");
/// assert_eq!(card.print_run, Some(145));
///
/// let no_base = parse_card_line("25 Joan Martinez, Real Madrid (NO BASE)").unwrap();
/// assert_eq!(no_base.print_run, None);
///
/// assert!(parse_card_line("1 Player Without Team").is_none());
/// ```
pub fn parse_card_line(line: &str) -> Option<ParsedCard> {
    let caps = PATTERNS.card.captures(line)?;
    let mut card = ParsedCard::new(&caps[1], caps[2].trim(), caps[3].trim());
    if let Some(run) = caps.get(4) {
        card = card.with_print_run(run.as_str().parse().ok()?);
    }
    Some(card)
}

/// Parses `NAME /PRINTRUN`, keeping multi-word names whole.
///
/// # Examples
///
/// ```
/// use checklist_parser::parse_parallel_line;
///
/// let parallel = parse_parallel_line("Electric Etch Red Pulsar /44").unwrap();
/// assert_eq!(parallel.name, "Electric Etch Red Pulsar");
/// assert_eq!(parallel.print_run, Some(44));
/// assert!(parallel.cards.is_none());
///
/// assert!(parse_parallel_line("Gold").is_none());
/// ```
pub fn parse_parallel_line(line: &str) -> Option<ParsedParallel> {
    let caps = PATTERNS.parallel.captures(line)?;
    let print_run = caps[2].parse().ok()?;
    Some(ParsedParallel::numbered(caps[1].trim(), print_run))
}

/// Recognizes a short, digit-free parallel name such as `Gold Vinyl`.
pub(crate) fn parse_unnumbered_parallel(line: &str) -> Option<ParsedParallel> {
    let has_digits = line.chars().any(|ch| ch.is_ascii_digit());
    let words = line.split_whitespace().count();
    (!has_digits && words <= MAX_UNNUMBERED_PARALLEL_WORDS)
        .then(|| ParsedParallel::unnumbered(line))
}

/// Returns `true` for the line that opens the base card region.
pub(crate) fn starts_card_line(line: &str) -> bool {
    PATTERNS.card_start.is_match(line)
}

/// Parses a `200 cards` / `1 card` count line.
pub(crate) fn parse_count_line(line: &str) -> Option<u32> {
    PATTERNS.count.captures(line)?[1].parse().ok()
}

/// Returns `true` for the `Parallels` header line.
pub(crate) fn is_parallels_header(line: &str) -> bool {
    line.eq_ignore_ascii_case("parallels")
}

/// Returns `true` for a line that opens a parallel-specific sub-checklist.
///
/// # Examples
///
/// ```
/// use checklist_parser::is_section_header;
///
/// assert!(is_section_header("Dual Jersey Ink Electric Etch Orange"));
/// assert!(!is_section_header("Electric Etch Orange /25"));
/// assert!(!is_section_header("1 Jude Bellingham, Real Madrid"));
/// assert!(!is_section_header("Gold Vinyl"));
/// ```
pub fn is_section_header(line: &str) -> bool {
    !PATTERNS.leading_number.is_match(line)
        && line.split_whitespace().count() >= MIN_HEADER_WORDS
        && !line.to_lowercase().contains("parallels")
        && !PATTERNS.trailing_print_run.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_line_fields() {
        let card = parse_card_line("2 Stephen Curry, Golden State Warriors /145").unwrap();
        assert_eq!(card.card_number, "2");
        assert_eq!(card.player_name, "Stephen Curry");
        assert_eq!(card.team, "Golden State Warriors");
        assert_eq!(card.print_run, Some(145));
    }

    #[test]
    fn test_card_line_without_print_run() {
        let card = parse_card_line("7 Vinicius Jr., Real Madrid").unwrap();
        assert_eq!(card.player_name, "Vinicius Jr.");
        assert_eq!(card.team, "Real Madrid");
        assert_eq!(card.print_run, None);
    }

    #[test]
    fn test_card_line_accents_and_hyphens() {
        let card = parse_card_line("1 Kylian Mbappé, Paris Saint-Germain /100").unwrap();
        assert_eq!(card.player_name, "Kylian Mbappé");
        assert_eq!(card.team, "Paris Saint-Germain");
    }

    #[test]
    fn test_card_line_rejects_suffixed_numbers() {
        assert!(parse_card_line("1-home Player, Team /10").is_none());
        assert!(parse_card_line("A1 Player, Team /10").is_none());
    }

    #[test]
    fn test_card_line_requires_comma_space() {
        assert!(parse_card_line("1 Player,Team").is_none());
    }

    #[test]
    fn test_card_line_overflowing_print_run_is_not_a_card() {
        assert!(parse_card_line("1 Player, Team /99999999999").is_none());
    }

    #[test]
    fn test_parallel_line_uses_last_print_run() {
        let parallel = parse_parallel_line("Gold /10 Refractor /5").unwrap();
        assert_eq!(parallel.name, "Gold /10 Refractor");
        assert_eq!(parallel.print_run, Some(5));

        let one_of_one = parse_parallel_line("Black /1").unwrap();
        assert_eq!(one_of_one.print_run, Some(1));
    }

    #[test]
    fn test_parallel_line_needs_space_before_slash() {
        assert!(parse_parallel_line("Gold/10").is_none());
        assert!(parse_parallel_line("/10").is_none());
    }

    #[test]
    fn test_unnumbered_parallel_shape() {
        assert_eq!(
            parse_unnumbered_parallel("Gold Vinyl"),
            Some(ParsedParallel::unnumbered("Gold Vinyl"))
        );
        assert!(parse_unnumbered_parallel("Pink Ice Prizm Die Cut Holo").is_none());
        assert!(parse_unnumbered_parallel("Gold 2").is_none());
    }

    #[test]
    fn test_card_start_shape() {
        assert!(starts_card_line("1 LeBron James, Lakers"));
        assert!(starts_card_line("12 Éder Militão, Real Madrid"));
        assert!(!starts_card_line("1 player, team"));
        assert!(!starts_card_line("Gold /10"));
    }

    #[test]
    fn test_count_line() {
        assert_eq!(parse_count_line("200 cards"), Some(200));
        assert_eq!(parse_count_line("1 Card"), Some(1));
        assert_eq!(parse_count_line("200 cards total"), None);
        assert_eq!(parse_count_line("cards"), None);
    }

    #[test]
    fn test_parallels_header_is_exact_and_case_insensitive() {
        assert!(is_parallels_header("Parallels"));
        assert!(is_parallels_header("PARALLELS"));
        assert!(!is_parallels_header("Parallels:"));
        assert!(!is_parallels_header("Base Parallels"));
    }

    #[test]
    fn test_section_header_rejects_parallels_keyword() {
        assert!(!is_section_header("Optic Base Parallels List"));
        assert!(!is_section_header("Two Words"));
    }
}
