//! Checklist type definitions for set, parallel and card modeling.
//!
//! This module defines the data model produced by checklist ingestion and
//! consumed by validation, review summaries and the grouping engine. The
//! types are plain nested records designed for serialization with
//! [`serde`], so a persistence layer can map them into its own rows without
//! touching parser state.

use serde::{Deserialize, Serialize};

/// Kind of set within a release.
///
/// Drives the type prefix used when generating slugs (`insert`, `auto`,
/// `mem`; base sets carry none).
///
/// # Examples
///
/// ```
/// use checklist_core::SetType;
///
/// assert_eq!(SetType::default(), SetType::Base);
/// assert_eq!(SetType::Autograph.slug_prefix(), Some("auto"));
/// assert_eq!(SetType::Base.slug_prefix(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SetType {
    /// The primary checklist of a release (the default).
    #[default]
    Base,
    /// Themed insert set.
    Insert,
    /// Autograph program.
    Autograph,
    /// Memorabilia (relic, patch) program.
    Memorabilia,
}

impl SetType {
    /// Returns the slug segment inserted before the set name, if any.
    pub fn slug_prefix(self) -> Option<&'static str> {
        match self {
            SetType::Base => None,
            SetType::Insert => Some("insert"),
            SetType::Autograph => Some("auto"),
            SetType::Memorabilia => Some("mem"),
        }
    }
}

/// A single card parsed from a checklist line.
///
/// `card_number` is kept exactly as written; it is not guaranteed to sort
/// numerically. `print_run` is `None` for unnumbered cards and for cards
/// marked `(NO BASE)`, which only exist in certain parallels.
///
/// # Examples
///
/// ```
/// use checklist_core::ParsedCard;
///
/// let card = ParsedCard::new("1", "LeBron James", "Los Angeles Lakers").with_print_run(145);
/// assert_eq!(card.card_number, "1");
/// assert_eq!(card.print_run, Some(145));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCard {
    /// Raw card number token (e.g. `"1"`, `"25"`, `"1-home"`)
    pub card_number: String,
    /// Player name as written
    pub player_name: String,
    /// Team name as written
    pub team: String,
    /// Serial numbering, `None` when unnumbered
    pub print_run: Option<u32>,
}

impl ParsedCard {
    /// Creates an unnumbered card.
    pub fn new(card_number: &str, player_name: &str, team: &str) -> Self {
        Self {
            card_number: card_number.to_string(),
            player_name: player_name.to_string(),
            team: team.to_string(),
            print_run: None,
        }
    }

    /// Sets the print run.
    pub fn with_print_run(mut self, print_run: u32) -> Self {
        self.print_run = Some(print_run);
        self
    }
}

/// A parallel variant declared in a checklist.
///
/// `cards == None` means the parallel mirrors the base checklist card for
/// card. `Some(cards)` carries a custom checklist, typically a rare parallel
/// that only exists for a subset of the base cards.
///
/// # Examples
///
/// ```
/// use checklist_core::{ParsedCard, ParsedParallel};
///
/// let gold = ParsedParallel::numbered("Gold", 10);
/// assert!(gold.mirrors_base());
///
/// let pulsar = ParsedParallel::numbered("Red Pulsar", 44)
///     .with_cards(vec![ParsedCard::new("3", "Player", "Team")]);
/// assert!(!pulsar.mirrors_base());
/// assert_eq!(pulsar.card_count(7), 1);
/// assert_eq!(gold.card_count(7), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedParallel {
    /// Display name of the parallel (e.g. `"Electric Etch Red Pulsar"`)
    pub name: String,
    /// Declared print run, `None` for unnumbered parallels
    pub print_run: Option<u32>,
    /// Custom checklist, `None` when mirroring the base set
    pub cards: Option<Vec<ParsedCard>>,
}

impl ParsedParallel {
    /// Creates a numbered parallel that mirrors the base checklist.
    pub fn numbered(name: &str, print_run: u32) -> Self {
        Self {
            name: name.to_string(),
            print_run: Some(print_run),
            cards: None,
        }
    }

    /// Creates an unnumbered parallel that mirrors the base checklist.
    pub fn unnumbered(name: &str) -> Self {
        Self {
            name: name.to_string(),
            print_run: None,
            cards: None,
        }
    }

    /// Attaches a custom checklist.
    pub fn with_cards(mut self, cards: Vec<ParsedCard>) -> Self {
        self.cards = Some(cards);
        self
    }

    /// Returns `true` when the parallel has no non-empty custom checklist.
    pub fn mirrors_base(&self) -> bool {
        self.cards.as_ref().is_none_or(|cards| cards.is_empty())
    }

    /// Number of cards in this parallel given the base checklist size.
    pub fn card_count(&self, base_card_count: usize) -> usize {
        match &self.cards {
            Some(cards) if !cards.is_empty() => cards.len(),
            _ => base_card_count,
        }
    }
}

/// A parallel-specific sub-checklist whose header matched no declared
/// parallel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSection {
    /// Header line as written
    pub header: String,
    /// Cards listed under the header
    pub cards: Vec<ParsedCard>,
}

/// A fully parsed checklist for one set.
///
/// `base_set_print_run` is inferred from the first base card that carries a
/// print run; base sets are sometimes numbered themselves.
///
/// # Examples
///
/// ```
/// use checklist_core::*;
///
/// let mut set = ParsedSet::new("Base Set");
/// set.parallels.push(ParsedParallel::numbered("Gold", 99));
/// set.base_cards.push(ParsedCard::new("1", "LeBron James", "Los Angeles Lakers"));
///
/// assert_eq!(set.find_parallel("Gold").unwrap().print_run, Some(99));
/// assert!(validate_parsed_set(&set).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedSet {
    /// Set name (first checklist line)
    pub set_name: String,
    /// Declared total card count (`"200 cards"`), if present
    pub expected_card_count: Option<u32>,
    /// Print run stamped on base cards, if any
    pub base_set_print_run: Option<u32>,
    /// Parallels in declaration order
    pub parallels: Vec<ParsedParallel>,
    /// Base checklist in declaration order
    pub base_cards: Vec<ParsedCard>,
    /// Sub-checklists that could not be attached to a parallel
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched_sections: Vec<UnmatchedSection>,
}

impl ParsedSet {
    /// Creates an empty set with the given name.
    pub fn new(set_name: &str) -> Self {
        Self {
            set_name: set_name.to_string(),
            ..Default::default()
        }
    }

    /// Finds a parallel by exact name.
    pub fn find_parallel(&self, name: &str) -> Option<&ParsedParallel> {
        self.parallels.iter().find(|parallel| parallel.name == name)
    }

    /// Total number of card records across the base set and every parallel.
    ///
    /// Mirror parallels count one card per base card.
    pub fn total_card_records(&self) -> usize {
        let base = self.base_cards.len();
        base + self
            .parallels
            .iter()
            .map(|parallel| parallel.card_count(base))
            .sum::<usize>()
    }
}

/// Read access to the fields the grouping engine needs from a set record.
///
/// Implemented by [`SetRecord`]; callers with their own persisted set type
/// implement it to sort without copying.
pub trait SetLike {
    /// URL slug of the set.
    fn slug(&self) -> &str;
    /// Display name of the set.
    fn name(&self) -> &str;
    /// Stored print run, if known.
    fn print_run(&self) -> Option<u32>;
    /// Stored parallel flag. `None` leaves the decision to the slug.
    fn is_parallel(&self) -> Option<bool> {
        None
    }
}

/// Minimal persisted set shape used for display ordering.
///
/// # Examples
///
/// ```
/// use checklist_core::{SetLike, SetRecord};
///
/// let set = SetRecord::new("2024-25-donruss-soccer-optic", "Optic");
/// assert_eq!(set.name(), "Optic");
/// assert_eq!(set.print_run(), None);
///
/// let gold = SetRecord::new("2024-25-donruss-soccer-optic-gold-parallel-10", "Optic Gold")
///     .with_print_run(10);
/// assert_eq!(gold.print_run(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetRecord {
    /// URL slug
    pub slug: String,
    /// Display name
    pub name: String,
    /// Stored print run
    #[serde(default)]
    pub print_run: Option<u32>,
    /// Stored parallel flag, when the caller has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_parallel: Option<bool>,
}

impl SetRecord {
    /// Creates a record with no print run.
    pub fn new(slug: &str, name: &str) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the print run.
    pub fn with_print_run(mut self, print_run: u32) -> Self {
        self.print_run = Some(print_run);
        self
    }

    /// Sets the parallel flag.
    pub fn with_parallel_flag(mut self, is_parallel: bool) -> Self {
        self.is_parallel = Some(is_parallel);
        self
    }
}

impl SetLike for SetRecord {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn print_run(&self) -> Option<u32> {
        self.print_run
    }

    fn is_parallel(&self) -> Option<bool> {
        self.is_parallel
    }
}

impl<T: SetLike + ?Sized> SetLike for &T {
    fn slug(&self) -> &str {
        (**self).slug()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn print_run(&self) -> Option<u32> {
        (**self).print_run()
    }

    fn is_parallel(&self) -> Option<bool> {
        (**self).is_parallel()
    }
}
