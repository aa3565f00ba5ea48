//! Deterministic grouping and ordering of sets for display.
//!
//! Two orderings are provided:
//!
//! - **By name** ([`sort_sets_grouped`]): sets are grouped under the base
//!   name parsed from their display name. Privileged groups come first in
//!   vocabulary order, the rest follow alphabetically. Inside a group the
//!   base set leads, unnumbered variants follow alphabetically, then
//!   numbered variants from the largest print run to the smallest.
//! - **By slug** ([`sort_sets`]): a flat three-tier ordering driven by
//!   slug signals. A stored parallel flag, when present, overrides the
//!   `-parallel` marker.
//!
//! Text comparisons are case-insensitive with a byte-order tiebreak, so the
//! result never depends on input order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use checklist_core::SetLike;
use serde::{Deserialize, Serialize};

use crate::resolve::{InferenceMode, Resolver, is_parallel_by_slug, print_run_of};

/// Sets sharing one base name, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGroup<T> {
    pub base_name: String,
    pub sets: Vec<T>,
}

/// Ordering key of one set within its name group.
#[derive(Debug)]
struct NameKey {
    base_name: String,
    variant: String,
    print_run: Option<u32>,
}

impl NameKey {
    fn tier(&self) -> u8 {
        match (self.variant.is_empty(), self.print_run) {
            (true, _) => 0,
            (false, None) => 1,
            (false, Some(_)) => 2,
        }
    }
}

/// Ordering key of one set in the slug ordering.
#[derive(Debug)]
struct SlugKey {
    tier: u8,
    text: String,
    print_run: Option<u32>,
}

/// Compares two strings case-insensitively, falling back to byte order.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Resolver {
    fn name_key<T: SetLike>(&self, set: &T) -> NameKey {
        let relationship = self.infer(set.name(), InferenceMode::Name);
        NameKey {
            base_name: relationship.base,
            variant: relationship.variant.unwrap_or_default(),
            print_run: numbered(set.print_run()).or(numbered(relationship.print_run)),
        }
    }

    fn slug_key<T: SetLike>(&self, set: &T) -> SlugKey {
        let slug = set.slug();
        let is_parallel = set.is_parallel().unwrap_or_else(|| is_parallel_by_slug(slug));
        if !is_parallel {
            return SlugKey {
                tier: 0,
                text: slug.to_string(),
                print_run: None,
            };
        }

        let print_run = numbered(set.print_run()).or(numbered(print_run_of(slug)));
        SlugKey {
            tier: if print_run.is_some() { 2 } else { 1 },
            text: self.variant_of(slug).unwrap_or_default(),
            print_run,
        }
    }

    /// Groups sets by the base name parsed from their display names.
    ///
    /// Groups are ordered privileged-first (vocabulary order), then
    /// alphabetically; sets within each group follow the name ordering.
    pub fn group_sets_by_name<T: SetLike>(&self, sets: Vec<T>) -> Vec<SetGroup<T>> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut keyed: Vec<(String, Vec<(NameKey, T)>)> = Vec::new();

        for set in sets {
            let key = self.name_key(&set);
            let slot = *index.entry(key.base_name.clone()).or_insert_with(|| {
                keyed.push((key.base_name.clone(), Vec::new()));
                keyed.len() - 1
            });
            keyed[slot].1.push((key, set));
        }

        let vocabulary = self.vocabulary();
        keyed.sort_by(|(a, _), (b, _)| {
            match (vocabulary.privileged_rank(a), vocabulary.privileged_rank(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => compare_text(a, b),
            }
        });

        keyed
            .into_iter()
            .map(|(base_name, mut members)| {
                members.sort_by(|(a, _), (b, _)| compare_within_group(a, b));
                SetGroup {
                    base_name,
                    sets: members.into_iter().map(|(_, set)| set).collect(),
                }
            })
            .collect()
    }

    /// Orders sets by name group, flattened.
    pub fn sort_sets_grouped<T: SetLike>(&self, sets: Vec<T>) -> Vec<T> {
        self.group_sets_by_name(sets)
            .into_iter()
            .flat_map(|group| group.sets)
            .collect()
    }

    /// Orders sets using slug signals only.
    pub fn sort_sets<T: SetLike>(&self, sets: Vec<T>) -> Vec<T> {
        let mut keyed: Vec<(SlugKey, T)> = sets
            .into_iter()
            .map(|set| (self.slug_key(&set), set))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_slug_keys(a, b));
        keyed.into_iter().map(|(_, set)| set).collect()
    }

    /// Groups sets under their base-set slug, each group in slug order.
    pub fn group_sets_by_base_slug<T: SetLike>(&self, sets: Vec<T>) -> BTreeMap<String, Vec<T>> {
        let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
        for set in sets {
            groups
                .entry(self.base_slug_of(set.slug()))
                .or_default()
                .push(set);
        }
        groups
            .into_iter()
            .map(|(base, members)| (base, self.sort_sets(members)))
            .collect()
    }
}

fn compare_within_group(a: &NameKey, b: &NameKey) -> Ordering {
    a.tier().cmp(&b.tier()).then_with(|| match (a.print_run, b.print_run) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| compare_text(&a.variant, &b.variant)),
        _ => compare_text(&a.variant, &b.variant),
    })
}

fn compare_slug_keys(a: &SlugKey, b: &SlugKey) -> Ordering {
    a.tier.cmp(&b.tier).then_with(|| match (a.print_run, b.print_run) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| compare_text(&a.text, &b.text)),
        _ => compare_text(&a.text, &b.text),
    })
}

/// A print run of zero carries no numbering.
fn numbered(print_run: Option<u32>) -> Option<u32> {
    print_run.filter(|run| *run > 0)
}

/// Groups sets by base name using the built-in vocabulary.
pub fn group_sets_by_name<T: SetLike>(sets: Vec<T>) -> Vec<SetGroup<T>> {
    Resolver::builtin().group_sets_by_name(sets)
}

/// Orders sets by name group using the built-in vocabulary.
///
/// # Examples
///
/// ```
/// use checklist_catalog::sort_sets_grouped;
/// use checklist_core::SetRecord;
///
/// let sets = vec![
///     SetRecord::new("kaboom-gold", "Kaboom Gold").with_print_run(10),
///     SetRecord::new("optic", "Optic"),
///     SetRecord::new("base", "Base"),
///     SetRecord::new("kaboom", "Kaboom"),
/// ];
/// let names: Vec<String> = sort_sets_grouped(sets).into_iter().map(|s| s.name).collect();
/// assert_eq!(names, ["Base", "Optic", "Kaboom", "Kaboom Gold"]);
/// ```
pub fn sort_sets_grouped<T: SetLike>(sets: Vec<T>) -> Vec<T> {
    Resolver::builtin().sort_sets_grouped(sets)
}

/// Orders sets by slug signals using the built-in vocabulary.
pub fn sort_sets<T: SetLike>(sets: Vec<T>) -> Vec<T> {
    Resolver::builtin().sort_sets(sets)
}

/// Groups sets under their base-set slug using the built-in vocabulary.
pub fn group_sets_by_base_slug<T: SetLike>(sets: Vec<T>) -> BTreeMap<String, Vec<T>> {
    Resolver::builtin().group_sets_by_base_slug(sets)
}
