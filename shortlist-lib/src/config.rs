//! Engine configuration
//!
//! Everything the engine would otherwise hard-code (catalog location, vector
//! backend, matching fields, blend weights, default result count) lives in
//! [`EngineConfig`]. Every field has a default, so a JSON file only needs the
//! keys it changes:
//!
//! ```json
//! {
//!   "catalog_path": "data/catalog.csv",
//!   "backend": "tfidf",
//!   "fields": ["name", "description", "test_type"],
//!   "weights": { "semantic": 0.7, "lexical": 0.3 },
//!   "default_top_k": 10
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::EntryField;
use crate::score::ScoreWeights;
use crate::{Error, Result};

/// Vector backend used for queries and catalog entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// TF-IDF fitted on the catalog
    #[default]
    TfIdf,
    /// Pretrained BGE sentence embedding
    Bge,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::TfIdf => f.write_str("tfidf"),
            Backend::Bge => f.write_str("bge"),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(Backend::TfIdf),
            "bge" => Ok(Backend::Bge),
            other => Err(Error::Config(format!(
                "unknown backend '{other}', expected 'tfidf' or 'bge'"
            ))),
        }
    }
}

/// Construction-time settings for a [`RecommendationEngine`](crate::engine::RecommendationEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// CSV catalog to load when building from config alone
    pub catalog_path: Option<PathBuf>,
    /// Vector backend
    pub backend: Backend,
    /// Catalog fields combined, in order, into each entry's matching text
    pub fields: Vec<EntryField>,
    /// Blend of vector and lexical relevance
    pub weights: ScoreWeights,
    /// Leave common English words out of the TF-IDF vocabulary
    pub stop_words: bool,
    /// Result count used by `recommend_default`
    pub default_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            backend: Backend::default(),
            fields: vec![EntryField::Name, EntryField::Description],
            weights: ScoreWeights::default(),
            stop_words: true,
            default_top_k: 10,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read '{}': {e}", path.display())))?;

        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid config '{}': {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable together.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::Config("at least one entry field is required".to_string()));
        }
        if !self
            .fields
            .iter()
            .any(|f| matches!(f, EntryField::Name | EntryField::Description))
        {
            return Err(Error::Config(
                "entry fields must include 'name' or 'description'".to_string(),
            ));
        }
        if self.default_top_k == 0 {
            return Err(Error::Config("default_top_k must be at least 1".to_string()));
        }
        self.weights.validate()
    }
}
