//! Parsed-set validation.
//!
//! Checks the internal consistency of a [`ParsedSet`] after parsing: missing
//! sections, duplicate card numbers and sub-checklists that could not be
//! attached to a parallel. Validation is advisory; callers decide whether a
//! non-empty result blocks persistence or is shown as warnings.
//!
//! Every check always runs, so a badly broken set reports all of its
//! problems at once.
//!
//! # Examples
//!
//! ```
//! use checklist_core::*;
//!
//! let mut set = ParsedSet::new("Test Set");
//! set.parallels.push(ParsedParallel::numbered("Gold", 10));
//! set.base_cards.push(ParsedCard::new("1", "Player A", "Team"));
//! set.base_cards.push(ParsedCard::new("1", "Player B", "Team"));
//!
//! assert_eq!(validation_messages(&set), vec!["Duplicate card number: 1"]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ParsedCard, ParsedSet};

/// Parsed-set validation errors.
///
/// The `Display` impl renders the message shown to the operator next to an
/// import preview.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Set name is empty or whitespace-only.
    #[error("Missing set name")]
    MissingSetName,
    /// No base cards were recognized.
    #[error("No base cards found")]
    NoBaseCards,
    /// No parallels were recognized.
    #[error("No parallels found")]
    NoParallels,
    /// A card number appears more than once in the base checklist.
    #[error("Duplicate card number: {0}")]
    DuplicateCardNumber(String),
    /// A card number appears more than once in a parallel's custom checklist.
    #[error("Duplicate card number in {parallel}: {card_number}")]
    DuplicateParallelCardNumber {
        parallel: String,
        card_number: String,
    },
    /// A sub-checklist header matched no declared parallel.
    #[error("Unmatched parallel checklist: {header} ({card_count} cards)")]
    UnmatchedSection { header: String, card_count: usize },
}

/// Validates a parsed set.
///
/// Reports each duplicated card number once, no matter how many times it
/// repeats.
///
/// # Examples
///
/// ```
/// use checklist_core::*;
///
/// let errors = validate_parsed_set(&ParsedSet::new(""));
/// assert!(errors.contains(&ValidationError::MissingSetName));
/// assert!(errors.contains(&ValidationError::NoBaseCards));
/// assert!(errors.contains(&ValidationError::NoParallels));
/// ```
pub fn validate_parsed_set(parsed: &ParsedSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if parsed.set_name.trim().is_empty() {
        errors.push(ValidationError::MissingSetName);
    }

    if parsed.base_cards.is_empty() {
        errors.push(ValidationError::NoBaseCards);
    }

    if parsed.parallels.is_empty() {
        errors.push(ValidationError::NoParallels);
    }

    errors.extend(
        duplicate_card_numbers(&parsed.base_cards)
            .into_iter()
            .map(ValidationError::DuplicateCardNumber),
    );

    for parallel in &parsed.parallels {
        let Some(cards) = &parallel.cards else {
            continue;
        };
        errors.extend(duplicate_card_numbers(cards).into_iter().map(|card_number| {
            ValidationError::DuplicateParallelCardNumber {
                parallel: parallel.name.clone(),
                card_number,
            }
        }));
    }

    for section in &parsed.unmatched_sections {
        errors.push(ValidationError::UnmatchedSection {
            header: section.header.clone(),
            card_count: section.cards.len(),
        });
    }

    errors
}

/// Validates a parsed set and renders each error as a message string.
pub fn validation_messages(parsed: &ParsedSet) -> Vec<String> {
    validate_parsed_set(parsed)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Card numbers seen more than once, in order of their first repeat.
fn duplicate_card_numbers(cards: &[ParsedCard]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();

    for card in cards {
        let number = card.card_number.as_str();
        if !seen.insert(number) && reported.insert(number) {
            duplicates.push(number.to_string());
        }
    }

    duplicates
}
