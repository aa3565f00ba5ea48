//! Slug generation for sets and cards.
//!
//! Generated parallel slugs follow the layout the resolver reads back:
//! `<year>-<release>[-<type>]-<set>-<variant>-parallel[-<print run>]`.

use checklist_core::SetType;

/// Marker segment separating a parallel's variant from its print run.
pub const PARALLEL_TOKEN: &str = "parallel";

/// Converts text into a lowercase, hyphen-delimited ASCII slug.
///
/// Whitespace becomes `-`, every other character outside `[a-z0-9-]` is
/// dropped, runs of `-` collapse and leading/trailing `-` are trimmed.
///
/// # Examples
///
/// ```
/// use checklist_catalog::slugify;
///
/// assert_eq!(slugify("2024-25 Donruss Soccer"), "2024-25-donruss-soccer");
/// assert_eq!(slugify("Artist's Proof  Gold"), "artists-proof-gold");
/// assert_eq!(slugify(" Kylian Mbappé "), "kylian-mbapp");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_whitespace() { '-' } else { ch };
        if !(mapped.is_ascii_lowercase() || mapped.is_ascii_digit() || mapped == '-') {
            continue;
        }
        if mapped == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(mapped);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Inputs for [`set_slug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetSlugParts<'a> {
    /// Season or year label (e.g. `"2024-25"`).
    pub year: &'a str,
    /// Release name without the year (e.g. `"Donruss Soccer"`).
    pub release_name: &'a str,
    /// Base set name (e.g. `"Optic"`).
    pub set_name: &'a str,
    /// Set kind, adds a type segment for non-base sets.
    pub set_type: SetType,
    /// Parallel variant name, `None` for the base set itself.
    pub variant: Option<&'a str>,
    /// Parallel print run.
    pub print_run: Option<u32>,
}

/// Builds the slug for a base set or one of its parallels.
///
/// # Examples
///
/// ```
/// use checklist_catalog::{SetSlugParts, set_slug};
///
/// let optic = SetSlugParts {
///     year: "2024-25",
///     release_name: "Donruss Soccer",
///     set_name: "Optic",
///     ..Default::default()
/// };
/// assert_eq!(set_slug(&optic), "2024-25-donruss-soccer-optic");
///
/// let cubic = SetSlugParts { variant: Some("Cubic"), print_run: Some(99), ..optic };
/// assert_eq!(set_slug(&cubic), "2024-25-donruss-soccer-optic-cubic-parallel-99");
/// ```
pub fn set_slug(parts: &SetSlugParts<'_>) -> String {
    let mut segments = vec![parts.year, parts.release_name];
    if let Some(prefix) = parts.set_type.slug_prefix() {
        segments.push(prefix);
    }
    segments.push(parts.set_name);
    let base = slugify(&segments.join(" "));

    let Some(variant) = parts.variant.map(slugify).filter(|v| !v.is_empty()) else {
        return base;
    };

    match parts.print_run {
        Some(run) => format!("{base}-{variant}-{PARALLEL_TOKEN}-{run}"),
        None => format!("{base}-{variant}-{PARALLEL_TOKEN}"),
    }
}

/// Builds the slug for a single card within a set.
///
/// # Examples
///
/// ```
/// use checklist_catalog::card_slug;
///
/// assert_eq!(
///     card_slug("2024-25-donruss-soccer-base", "1", "Jude Bellingham"),
///     "2024-25-donruss-soccer-base-1-jude-bellingham"
/// );
/// ```
pub fn card_slug(set_slug: &str, card_number: &str, player_name: &str) -> String {
    slugify(&format!("{set_slug} {card_number} {player_name}"))
}
