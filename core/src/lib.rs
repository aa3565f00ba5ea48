//! Core checklist types and shared set primitives.
//!
//! This crate defines the foundational types for modeling trading-card
//! checklists:
//!
//! - [`ParsedSet`]: one set's checklist: name, declared card count, base
//!   print run, parallels and base cards.
//! - [`ParsedParallel`]: a parallel variant, either mirroring the base
//!   checklist or carrying its own custom checklist.
//! - [`ParsedCard`]: a single card line (number, player, team, print run).
//! - [`SetRecord`] / [`SetLike`]: the persisted-set shape consumed by the
//!   grouping engine.
//!
//! Validation ([`validate_parsed_set`]) catches duplicate card numbers and
//! missing sections. [`generate_parse_summary`] renders a set for review
//! before it is committed to storage.
//!
//! # Example
//!
//! ```
//! use checklist_core::*;
//!
//! let mut set = ParsedSet::new("Base Set");
//! set.expected_card_count = Some(200);
//! set.parallels.push(ParsedParallel::numbered("Gold", 99));
//! set.base_cards.push(
//!     ParsedCard::new("1", "LeBron James", "Los Angeles Lakers").with_print_run(145),
//! );
//!
//! assert!(validate_parsed_set(&set).is_empty());
//! assert!(generate_parse_summary(&set).starts_with("Set: Base Set\n"));
//! ```

mod summary;
mod types;
mod validate;

pub use summary::generate_parse_summary;
pub use types::*;
pub use validate::{ValidationError, validate_parsed_set, validation_messages};
