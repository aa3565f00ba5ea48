//! Set relationship inference from display names and slugs.
//!
//! A set is identified either by its human-readable name (`"Optic Gold"`)
//! or by its generated slug
//! (`"2024-25-donruss-soccer-optic-gold-parallel-10"`). Both forms go
//! through one [`Resolver`] backed by a shared [`Vocabulary`], so the name
//! heuristics used for display grouping and the slug heuristics used for
//! routing read the same word tables.
//!
//! Inference never fails. When no rule applies the resolver returns its best
//! guess and marks it with [`Confidence::Fallback`].
//!
//! # Examples
//!
//! ```
//! use checklist_catalog::{InferenceMode, Resolver, Vocabulary};
//!
//! let resolver = Resolver::new(Vocabulary::default()).unwrap();
//!
//! let by_name = resolver.infer("Rated Rookies Press Proof Gold", InferenceMode::Name);
//! assert_eq!(by_name.base, "Rated Rookies");
//! assert_eq!(by_name.variant.as_deref(), Some("Press Proof Gold"));
//!
//! let by_slug = resolver.infer("2024-25-donruss-soccer-optic-cubic-parallel-99", InferenceMode::Slug);
//! assert_eq!(by_slug.base, "2024-25-donruss-soccer-optic");
//! assert_eq!(by_slug.print_run, Some(99));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::slug::PARALLEL_TOKEN;
use crate::vocabulary::Vocabulary;

/// Substring that marks a slug as a parallel.
const PARALLEL_MARKER: &str = "-parallel";

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(|| {
    // The built-in vocabulary is a compile-time constant; failure is a programmer error.
    Resolver::new(Vocabulary::default()).expect("built-in vocabulary must compile")
});

static TRAILING_PRINT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*/(\d+)$").expect("static regex must compile")
});

/// Which representation of a set is being inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMode {
    /// Human-readable display name.
    Name,
    /// Hyphen-delimited slug.
    Slug,
}

/// How the resolver arrived at a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// A known base name, a known base prefix, or a slug without a parallel
    /// marker.
    Exact,
    /// A variant grammar rule or a known set-name fragment matched.
    Pattern,
    /// No rule matched; the result is a heuristic of last resort.
    Fallback,
}

/// Inferred relationship between a set and its base set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Base set name (name mode) or base slug (slug mode).
    pub base: String,
    /// Variant name or slug segment, `None` for the base set itself.
    pub variant: Option<String>,
    /// Print run carried by the name suffix or the slug.
    pub print_run: Option<u32>,
    /// Whether the set is a parallel of `base`.
    pub is_parallel: bool,
    /// How the result was reached.
    pub confidence: Confidence,
}

/// Base name and variant split out of a display name.
///
/// `variant` is empty when the set is its own base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName {
    pub base_name: String,
    pub variant: String,
}

impl DisplayName {
    fn base(name: &str) -> Self {
        Self {
            base_name: name.to_string(),
            variant: String::new(),
        }
    }

    fn split(base_name: &str, variant: String) -> Self {
        Self {
            base_name: base_name.trim().to_string(),
            variant,
        }
    }

    /// Returns `true` when a variant was recognized.
    pub fn is_parallel(&self) -> bool {
        !self.variant.is_empty()
    }
}

/// Slug split into base and variant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SlugSplit {
    base: String,
    variant: Option<String>,
    confidence: Confidence,
}

/// Relationship resolver compiled from a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct Resolver {
    vocabulary: Vocabulary,
    fragments: Vec<Vec<String>>,
    artist_proof: Regex,
    press_proof: Regex,
    holo_laser: Regex,
    trailing_color: Option<Regex>,
}

impl Resolver {
    /// Compiles the name grammar for `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVocabulary`](crate::CatalogError::InvalidVocabulary)
    /// if the vocabulary fails validation, or
    /// [`PatternError`](crate::CatalogError::PatternError) if a derived
    /// pattern does not compile.
    pub fn new(vocabulary: Vocabulary) -> Result<Self> {
        vocabulary.validate()?;

        let artist_proof = match alternation(&vocabulary.artist_proof_colors) {
            Some(colors) => format!(r"(?i)^(.+?)\s+Artist's Proof\s*({colors})?$"),
            None => r"(?i)^(.+?)\s+Artist's Proof()$".to_string(),
        };
        let press_proof = match alternation(&vocabulary.press_proof_colors) {
            Some(colors) => format!(r"(?i)^(.+?)\s+Press Proof(?:\s+({colors}))?$"),
            None => r"(?i)^(.+?)\s+Press Proof()$".to_string(),
        };
        let trailing_color = alternation(&vocabulary.color_words)
            .map(|colors| Regex::new(&format!(r"(?i)\s+({colors})(\s+\d+)?$")))
            .transpose()?;

        let fragments = vocabulary
            .set_name_fragments
            .iter()
            .map(|fragment| fragment.split('-').map(str::to_string).collect())
            .collect();

        Ok(Self {
            artist_proof: Regex::new(&artist_proof)?,
            press_proof: Regex::new(&press_proof)?,
            holo_laser: Regex::new(r"(?i)^(.+?)\s+Holo\s+(.+?)\s+Laser$")?,
            trailing_color,
            fragments,
            vocabulary,
        })
    }

    /// Returns the process-wide resolver built from the default vocabulary.
    pub fn builtin() -> &'static Resolver {
        &DEFAULT_RESOLVER
    }

    /// Vocabulary this resolver was compiled from.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Infers the relationship of a set from its name or slug.
    ///
    /// In name mode a trailing ` /<digits>` is split off and reported as the
    /// print run before the name grammar runs.
    pub fn infer(&self, text: &str, mode: InferenceMode) -> Relationship {
        match mode {
            InferenceMode::Name => self.infer_from_name(text),
            InferenceMode::Slug => self.infer_from_slug(text),
        }
    }

    fn infer_from_name(&self, name: &str) -> Relationship {
        let (name, print_run) = split_print_run_suffix(name.trim());
        let (display, confidence) = self.classify_name(name);
        let is_parallel = display.is_parallel();

        Relationship {
            base: display.base_name,
            variant: is_parallel.then_some(display.variant),
            print_run,
            is_parallel,
            confidence,
        }
    }

    fn infer_from_slug(&self, slug: &str) -> Relationship {
        match self.split_slug(slug) {
            Some(split) => Relationship {
                base: split.base,
                variant: split.variant,
                print_run: print_run_of(slug),
                is_parallel: true,
                confidence: split.confidence,
            },
            None => Relationship {
                base: slug.to_string(),
                variant: None,
                print_run: None,
                is_parallel: false,
                confidence: Confidence::Exact,
            },
        }
    }

    /// Splits a display name into base name and variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use checklist_catalog::Resolver;
    ///
    /// let resolver = Resolver::builtin();
    /// let parsed = resolver.parse_display_name("Kaboom Holo Gold Laser");
    /// assert_eq!(parsed.base_name, "Kaboom");
    /// assert_eq!(parsed.variant, "Holo Gold Laser");
    ///
    /// assert_eq!(resolver.parse_display_name("Kit Kings").variant, "");
    /// ```
    pub fn parse_display_name(&self, name: &str) -> DisplayName {
        self.classify_name(name).0
    }

    fn classify_name(&self, name: &str) -> (DisplayName, Confidence) {
        for base in &self.vocabulary.base_names {
            if name == base {
                return (DisplayName::base(base), Confidence::Exact);
            }
            if let Some(rest) = name
                .strip_prefix(base.as_str())
                .and_then(|rest| rest.strip_prefix(' '))
            {
                return (
                    DisplayName::split(base, rest.trim().to_string()),
                    Confidence::Exact,
                );
            }
        }

        if let Some(caps) = self.artist_proof.captures(name) {
            let variant = match caps.get(2).filter(|color| !color.is_empty()) {
                Some(color) => format!("Artist's Proof {}", color.as_str()),
                None => "Artist's Proof".to_string(),
            };
            return (DisplayName::split(&caps[1], variant), Confidence::Pattern);
        }

        for suffix in &self.vocabulary.suffix_variants {
            if let Some(base) = name
                .strip_suffix(suffix.as_str())
                .and_then(|rest| rest.strip_suffix(' '))
                .filter(|base| !base.trim().is_empty())
            {
                return (DisplayName::split(base, suffix.clone()), Confidence::Pattern);
            }
        }

        if let Some(caps) = self.press_proof.captures(name) {
            let variant = match caps.get(2).filter(|color| !color.is_empty()) {
                Some(color) => format!("Press Proof {}", color.as_str()),
                None => "Press Proof".to_string(),
            };
            return (DisplayName::split(&caps[1], variant), Confidence::Pattern);
        }

        if let Some(caps) = self.holo_laser.captures(name) {
            let variant = format!("Holo {} Laser", &caps[2]);
            return (DisplayName::split(&caps[1], variant), Confidence::Pattern);
        }

        if let Some(found) = self
            .trailing_color
            .as_ref()
            .and_then(|pattern| pattern.find(name))
        {
            let base = &name[..found.start()];
            if !base.trim().is_empty() {
                let variant = found.as_str().trim().to_string();
                return (DisplayName::split(base, variant), Confidence::Pattern);
            }
        }

        debug!(set_name = name, "No variant grammar matched; treating as base set");
        (DisplayName::base(name), Confidence::Fallback)
    }

    /// Returns the base-set slug of a parallel slug.
    ///
    /// Non-parallel slugs are returned unchanged.
    pub fn base_slug_of(&self, slug: &str) -> String {
        self.split_slug(slug)
            .map_or_else(|| slug.to_string(), |split| split.base)
    }

    /// Returns the variant segment of a parallel slug.
    pub fn variant_of(&self, slug: &str) -> Option<String> {
        self.split_slug(slug).and_then(|split| split.variant)
    }

    fn split_slug(&self, slug: &str) -> Option<SlugSplit> {
        let marker = slug.find(PARALLEL_MARKER)?;
        let before = &slug[..marker];
        let segments: Vec<&str> = before.split('-').collect();

        // Known fragment whose aligned occurrence ends furthest right. A
        // fragment ending at the marker leaves no variant. Ties prefer the
        // longer fragment.
        let mut best: Option<(usize, usize)> = None;
        for fragment in &self.fragments {
            let len = fragment.len();
            if len == 0 || len > segments.len() {
                continue;
            }
            let found = (0..=segments.len() - len).rev().find(|&start| {
                segments[start..start + len]
                    .iter()
                    .zip(fragment)
                    .all(|(segment, word)| *segment == word.as_str())
            });
            if let Some(start) = found {
                let end = start + len;
                if best.is_none_or(|(best_end, best_len)| {
                    end > best_end || (end == best_end && len > best_len)
                }) {
                    best = Some((end, len));
                }
            }
        }

        let (base_len, confidence) = match best {
            Some((end, _)) => (end, Confidence::Pattern),
            None => {
                debug!(slug, "No known set-name fragment; dropping last segment");
                (segments.len().saturating_sub(1), Confidence::Fallback)
            }
        };

        if base_len == 0 {
            return Some(SlugSplit {
                base: before.to_string(),
                variant: None,
                confidence: Confidence::Fallback,
            });
        }

        let variant = segments[base_len..].join("-");
        Some(SlugSplit {
            base: segments[..base_len].join("-"),
            variant: (!variant.is_empty()).then_some(variant),
            confidence,
        })
    }
}

/// Returns `true` when the slug names a parallel set.
///
/// # Examples
///
/// ```
/// use checklist_catalog::is_parallel_by_slug;
///
/// assert!(is_parallel_by_slug("2024-25-donruss-soccer-optic-cubic-parallel-99"));
/// assert!(!is_parallel_by_slug("2024-25-donruss-soccer-optic"));
/// ```
pub fn is_parallel_by_slug(slug: &str) -> bool {
    slug.contains(PARALLEL_MARKER)
}

/// Returns the base-set slug using the built-in vocabulary.
///
/// # Examples
///
/// ```
/// use checklist_catalog::base_slug_of;
///
/// assert_eq!(
///     base_slug_of("2024-25-donruss-soccer-rated-rookies-blue-cubic-parallel-49"),
///     "2024-25-donruss-soccer-rated-rookies"
/// );
/// ```
pub fn base_slug_of(slug: &str) -> String {
    Resolver::builtin().base_slug_of(slug)
}

/// Returns the variant segment of a parallel slug using the built-in
/// vocabulary.
///
/// # Examples
///
/// ```
/// use checklist_catalog::variant_of;
///
/// assert_eq!(
///     variant_of("2024-25-donruss-soccer-optic-blue-cubic-parallel-99").as_deref(),
///     Some("blue-cubic")
/// );
/// assert_eq!(variant_of("2024-25-donruss-soccer-optic"), None);
/// ```
pub fn variant_of(slug: &str) -> Option<String> {
    Resolver::builtin().variant_of(slug)
}

/// Returns the print run that follows the `parallel` segment of a slug.
///
/// # Examples
///
/// ```
/// use checklist_catalog::print_run_of;
///
/// assert_eq!(print_run_of("2024-25-donruss-soccer-optic-cubic-parallel-99"), Some(99));
/// assert_eq!(print_run_of("2024-25-donruss-soccer-optic-cubic-parallel"), None);
/// ```
pub fn print_run_of(slug: &str) -> Option<u32> {
    if !is_parallel_by_slug(slug) {
        return None;
    }
    let mut segments = slug.split('-');
    segments.find(|segment| *segment == PARALLEL_TOKEN)?;
    segments.next()?.parse().ok()
}

/// Splits a display name using the built-in vocabulary.
///
/// # Examples
///
/// ```
/// use checklist_catalog::parse_display_name;
///
/// let parsed = parse_display_name("Base Red");
/// assert_eq!((parsed.base_name.as_str(), parsed.variant.as_str()), ("Base", "Red"));
/// ```
pub fn parse_display_name(name: &str) -> DisplayName {
    Resolver::builtin().parse_display_name(name)
}

/// Infers a relationship using the built-in vocabulary.
pub fn infer_relationship(text: &str, mode: InferenceMode) -> Relationship {
    Resolver::builtin().infer(text, mode)
}

/// Splits a trailing ` /<digits>` off a display name.
fn split_print_run_suffix(name: &str) -> (&str, Option<u32>) {
    if let Some(caps) = TRAILING_PRINT_RUN.captures(name) {
        let (Some(stem), Some(run)) = (caps.get(1), caps.get(2)) else {
            return (name, None);
        };
        if !stem.as_str().trim().is_empty() {
            if let Ok(run) = run.as_str().parse() {
                return (stem.as_str().trim_end(), Some(run));
            }
        }
    }
    (name, None)
}

/// Builds a regex alternation from literal words, matching any run of
/// whitespace between words. `None` when the list is empty.
fn alternation(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    Some(
        words
            .iter()
            .map(|word| {
                word.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect::<Vec<_>>()
            .join("|"),
    )
}
