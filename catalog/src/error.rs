//! Error types for catalog vocabulary operations.
//!
//! Covers loading and saving vocabulary files and compiling the name
//! grammar built from them. Inference and grouping never fail; only the
//! configuration layer does.

use thiserror::Error;

/// Errors that can occur while loading or compiling a vocabulary.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Vocabulary validation failure (e.g. blank entries).
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// A vocabulary-derived pattern failed to compile.
    #[error("pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
