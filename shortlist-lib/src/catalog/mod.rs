//! Assessment catalog storage
//!
//! The catalog is loaded once from an already-materialized source and is
//! read-only afterwards. Entry order is the load order, and that order is the
//! tie-break basis for ranking.
//!
//! # Loading Rules
//!
//! - every record must have a non-blank `name` and `url`, otherwise the whole
//!   load fails
//! - `url` is the key: later records repeating a `url` are dropped with a
//!   warning, the first one wins
//! - a source with no records fails
//!
//! # Usage
//!
//! ```ignore
//! use shortlist_lib::catalog::Catalog;
//!
//! let catalog = Catalog::from_csv_path("data/catalog.csv")?;
//! for entry in catalog.iter() {
//!     println!("{} -> {}", entry.name, entry.url);
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single assessment in the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name
    pub name: String,
    /// Canonical link, unique within a catalog
    pub url: String,
    /// Free text used for matching (may be empty)
    #[serde(default)]
    pub description: String,
    /// Short classification code (e.g. "K", "P")
    #[serde(default)]
    pub test_type: String,
    /// Assessment length as given by the source
    #[serde(default)]
    pub duration: String,
    /// Whether the assessment can be taken remotely
    #[serde(default)]
    pub remote_support: bool,
    /// Whether the assessment adapts to the candidate
    #[serde(default)]
    pub adaptive_support: bool,
}

/// Catalog fields that can contribute to an entry's matching text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Name,
    Description,
    TestType,
    Duration,
}

impl CatalogEntry {
    /// Value of a single text field.
    #[must_use]
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Name => &self.name,
            EntryField::Description => &self.description,
            EntryField::TestType => &self.test_type,
            EntryField::Duration => &self.duration,
        }
    }

    /// Matching text built from `fields`, in the given order, skipping blanks.
    #[must_use]
    pub fn text(&self, fields: &[EntryField]) -> String {
        fields
            .iter()
            .map(|f| self.field(*f).trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// An untyped catalog row as it comes out of a tabular source.
///
/// Every column is optional here; [`Catalog::load`] decides what is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub test_type: Option<String>,
    pub duration: Option<String>,
    pub remote_support: Option<String>,
    pub adaptive_support: Option<String>,
}

impl RawRecord {
    /// Convert to an entry, failing if `name` or `url` is missing.
    ///
    /// `number` is the 1-based record number used in error messages.
    fn into_entry(self, number: usize) -> Result<CatalogEntry> {
        let name = required(self.name.as_deref().unwrap_or_default(), "name", number)?;
        let url = required(self.url.as_deref().unwrap_or_default(), "url", number)?;

        Ok(CatalogEntry {
            name,
            url,
            description: optional(self.description),
            test_type: optional(self.test_type),
            duration: optional(self.duration),
            remote_support: self.remote_support.as_deref().is_some_and(parse_flag),
            adaptive_support: self.adaptive_support.as_deref().is_some_and(parse_flag),
        })
    }
}

/// Trimmed `value`, or a `CatalogLoad` error naming the record if it is blank.
fn required(value: &str, column: &str, number: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::CatalogLoad(format!(
            "record {number} is missing required field '{column}'"
        )));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parse a boolean-like cell. Anything unrecognised counts as `false`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "t" | "1"
    )
}

/// Immutable, ordered set of catalog entries keyed by `url`.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    duplicates_dropped: usize,
}

impl Catalog {
    /// Load a catalog from raw records in source order.
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_entry(i + 1))
            .collect::<Result<Vec<_>>>()?;

        Self::from_entries(entries)
    }

    /// Build a catalog from typed entries in the given order.
    ///
    /// Applies the same validation and deduplication as [`load`](Self::load).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::CatalogLoad("catalog source has no entries".to_string()));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        let mut duplicates_dropped = 0;

        for (i, mut entry) in entries.into_iter().enumerate() {
            entry.name = required(&entry.name, "name", i + 1)?;
            entry.url = required(&entry.url, "url", i + 1)?;

            if !seen.insert(entry.url.clone()) {
                tracing::warn!(record = i + 1, url = %entry.url, "dropping duplicate catalog url");
                duplicates_dropped += 1;
                continue;
            }
            kept.push(entry);
        }

        tracing::info!(
            entries = kept.len(),
            duplicates_dropped,
            "loaded assessment catalog"
        );

        Ok(Self {
            entries: kept,
            duplicates_dropped,
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a successfully loaded catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at load position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Load position of the entry with this `url`.
    #[must_use]
    pub fn position(&self, url: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.url == url)
    }

    /// Entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// How many later duplicates were discarded during loading.
    #[must_use]
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

mod csv;
