//! Set relationship inference and display ordering for card catalogs.
//!
//! Everything here works from the two identifiers a catalog keeps for a set:
//! its display name and its slug. The [`Resolver`] infers whether a set is a
//! parallel, which base set it belongs to, and its print run. The grouping
//! functions turn those relationships into a stable display order. Slug
//! generation produces the slugs the resolver reads back.
//!
//! All word tables come from a [`Vocabulary`], loadable from YAML. The free
//! functions use the built-in vocabulary.
//!
//! # Example
//!
//! ```
//! use checklist_catalog::{SetSlugParts, is_parallel_by_slug, print_run_of, set_slug};
//!
//! let slug = set_slug(&SetSlugParts {
//!     year: "2024-25",
//!     release_name: "Donruss Soccer",
//!     set_name: "Optic",
//!     variant: Some("Cubic"),
//!     print_run: Some(99),
//!     ..Default::default()
//! });
//!
//! assert!(is_parallel_by_slug(&slug));
//! assert_eq!(print_run_of(&slug), Some(99));
//! ```

mod error;
mod grouping;
mod resolve;
mod slug;
mod vocabulary;

pub use error::{CatalogError, Result};
pub use grouping::{
    SetGroup, compare_text, group_sets_by_base_slug, group_sets_by_name, sort_sets,
    sort_sets_grouped,
};
pub use resolve::{
    Confidence, DisplayName, InferenceMode, Relationship, Resolver, base_slug_of,
    infer_relationship, is_parallel_by_slug, parse_display_name, print_run_of, variant_of,
};
pub use slug::{PARALLEL_TOKEN, SetSlugParts, card_slug, set_slug, slugify};
pub use vocabulary::{VOCABULARY_VERSION, Vocabulary};
