//! Checklist text normalization.

/// One non-blank input line with its 1-based position in the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexedLine {
    pub(crate) line_number: usize,
    pub(crate) text: String,
}

/// Splits raw checklist text into trimmed, non-blank lines.
///
/// A leading byte-order mark is dropped and `\r\n`/`\r` line endings are
/// accepted.
pub(crate) fn to_indexed_lines(raw: &str) -> Vec<IndexedLine> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    unified
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let text = line.trim();
            (!text.is_empty()).then(|| IndexedLine {
                line_number: index + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped_numbers_kept() {
        let lines = to_indexed_lines("Set\n\n   \nParallels\n");
        assert_eq!(
            lines,
            vec![
                IndexedLine {
                    line_number: 1,
                    text: "Set".to_string()
                },
                IndexedLine {
                    line_number: 4,
                    text: "Parallels".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_bom_and_crlf() {
        let lines = to_indexed_lines("\u{feff}Base Set\r\n200 cards\r\nParallels\rGold /10");
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, ["Base Set", "200 cards", "Parallels", "Gold /10"]);
    }

    #[test]
    fn test_whitespace_only_input_is_empty() {
        assert!(to_indexed_lines("   \n\n   ").is_empty());
        assert!(to_indexed_lines("").is_empty());
    }
}
