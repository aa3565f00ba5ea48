//! Versioned vocabulary configuration for relationship inference.
//!
//! The vocabulary holds every product-specific table the resolver and the
//! grouping engine depend on: set-name fragments used to split parallel
//! slugs, the variant words recognized in display names, and the ordered
//! list of groups that sort ahead of everything else. Keeping them in a
//! YAML file lets new card-product conventions be added without code
//! changes.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! base_names: [Base, Optic]
//! set_name_fragments: [base, optic, rated-rookies, kaboom]
//! artist_proof_colors: [Gold, Red, Bronze]
//! press_proof_colors: [Silver, Gold, Black]
//! suffix_variants: [Prime, Tip-off, Holo, Patch, Tag]
//! color_words: [Red, Blue, Gold, Pink Ice]
//! privileged_groups: [Base, Optic]
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::slug::slugify;

/// Current vocabulary format version.
pub const VOCABULARY_VERSION: &str = "1.0";

/// Word tables driving name and slug inference.
///
/// Missing lists in a YAML file fall back to the built-in tables, so a file
/// only needs to override what it changes.
///
/// # Examples
///
/// ```
/// use checklist_catalog::Vocabulary;
///
/// let vocabulary = Vocabulary::default();
/// assert_eq!(vocabulary.privileged_groups, vec!["Base", "Optic"]);
/// assert!(vocabulary.set_name_fragments.iter().any(|f| f == "rated-rookies"));
/// assert!(vocabulary.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Format version (e.g. `"1.0"`).
    pub version: String,
    /// Names that are their own base set and prefix their parallels
    /// (`"Base"`, `"Base Red"`).
    pub base_names: Vec<String>,
    /// Slug fragments that end a base-set slug (`"rated-rookies"`).
    pub set_name_fragments: Vec<String>,
    /// Colors allowed after `Artist's Proof`.
    pub artist_proof_colors: Vec<String>,
    /// Colors allowed after `Press Proof`.
    pub press_proof_colors: Vec<String>,
    /// Case-sensitive trailing words that name a variant on their own.
    pub suffix_variants: Vec<String>,
    /// Trailing color/finish words, optionally followed by a number.
    pub color_words: Vec<String>,
    /// Group names sorted first, in this order.
    pub privileged_groups: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION.to_string(),
            base_names: strings(&["Base", "Optic"]),
            set_name_fragments: strings(&[
                "base",
                "optic",
                "rated-rookies",
                "kaboom",
                "downtown",
                "animation",
                "crunch-time",
                "kit-kings",
                "kit-series",
                "magicians",
                "net-marvels",
                "night-moves",
                "pitch-kings",
                "rookie-kings",
                "the-rookies",
                "zero-gravity",
                "beautiful-game",
                "signature-series",
                "dual-jersey-ink",
            ]),
            artist_proof_colors: strings(&["Gold", "Red", "Bronze"]),
            press_proof_colors: strings(&[
                "Silver", "Gold", "Black", "Blue", "Red", "Purple", "Green", "Orange",
            ]),
            suffix_variants: strings(&["Prime", "Tip-off", "Holo", "Patch", "Tag"]),
            color_words: strings(&[
                "Red",
                "Blue",
                "Gold",
                "Silver",
                "Black",
                "Pink",
                "Green",
                "Purple",
                "Orange",
                "Aqua",
                "Teal",
                "Dragon Scale",
                "Plum Blossom",
                "Pink Ice",
                "Pink Velocity",
                "Argyle",
                "Ice",
                "Velocity",
                "Cubic",
                "Diamond",
                "Mojo",
                "Power",
                "Pandora",
                "Green Vinyl",
                "Gold Vinyl",
            ]),
            privileged_groups: strings(&["Base", "Optic"]),
        }
    }
}

impl Vocabulary {
    /// Loads a vocabulary from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CatalogError::IoError) if the file cannot be
    /// read, [`YamlError`](CatalogError::YamlError) if parsing fails, or
    /// [`InvalidVocabulary`](CatalogError::InvalidVocabulary) if validation
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let vocabulary: Self = serde_yaml::from_reader(reader)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Parses a vocabulary from YAML text and validates it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let vocabulary: Self = serde_yaml::from_str(yaml)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Saves the vocabulary as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CatalogError::IoError) if the file cannot be
    /// written, or [`YamlError`](CatalogError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks structural invariants: a version is present, no entry is
    /// blank, and set-name fragments are already in slug form.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CatalogError::InvalidVocabulary(
                "version cannot be empty".to_string(),
            ));
        }

        let tables = [
            ("base_names", &self.base_names),
            ("set_name_fragments", &self.set_name_fragments),
            ("artist_proof_colors", &self.artist_proof_colors),
            ("press_proof_colors", &self.press_proof_colors),
            ("suffix_variants", &self.suffix_variants),
            ("color_words", &self.color_words),
            ("privileged_groups", &self.privileged_groups),
        ];
        for (table, entries) in tables {
            if entries.iter().any(|entry| entry.trim().is_empty()) {
                return Err(CatalogError::InvalidVocabulary(format!(
                    "{table} contains a blank entry"
                )));
            }
        }

        if let Some(fragment) = self
            .set_name_fragments
            .iter()
            .find(|fragment| slugify(fragment) != **fragment)
        {
            return Err(CatalogError::InvalidVocabulary(format!(
                "set name fragment is not a slug: {fragment}"
            )));
        }

        Ok(())
    }

    /// Position of `group` in the privileged list, if present.
    pub fn privileged_rank(&self, group: &str) -> Option<usize> {
        self.privileged_groups.iter().position(|name| name == group)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_builtin_tables() {
        let yaml = r#"
version: "1.1"
privileged_groups: [Base, Optic, Rated Rookies]
"#;
        let vocabulary = Vocabulary::from_yaml(yaml).unwrap();
        assert_eq!(vocabulary.version, "1.1");
        assert_eq!(vocabulary.privileged_rank("Rated Rookies"), Some(2));
        assert_eq!(
            vocabulary.color_words,
            Vocabulary::default().color_words
        );
    }

    #[test]
    fn test_rejects_blank_entries() {
        let yaml = r#"
version: "1.0"
color_words: [Red, "  "]
"#;
        let err = Vocabulary::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidVocabulary(_)));
        assert!(err.to_string().contains("color_words"));
    }

    #[test]
    fn test_rejects_non_slug_fragments() {
        let yaml = r#"
version: "1.0"
set_name_fragments: [Rated Rookies]
"#;
        let err = Vocabulary::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Rated Rookies"));
    }

    #[test]
    fn test_rejects_empty_version() {
        let yaml = "version: \"\"\n";
        assert!(Vocabulary::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabulary.yml");

        let mut original = Vocabulary::default();
        original.color_words.push("Neon Green".to_string());
        original.save(&path).unwrap();

        let loaded = Vocabulary::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Vocabulary::load(dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, CatalogError::IoError(_)));
    }
}
