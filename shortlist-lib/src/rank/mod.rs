//! Ranking of scored catalog entries
//!
//! Orders candidates by descending score. Equal scores keep catalog load
//! order (the sort is stable), so identical inputs always produce identical
//! output. Results are truncated to `top_k` and never repeat a `url`.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::CatalogEntry;
use crate::{Error, Result};

/// A catalog entry paired with its relevance score for one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    /// Load position of the entry in the catalog
    pub index: usize,
    /// The scored entry
    pub entry: &'a CatalogEntry,
    /// Relevance score (higher is more relevant)
    pub score: f32,
}

/// Rank `entries` by `scores` and keep the best `top_k`.
///
/// `scores[i]` belongs to `entries[i]`. Non-finite scores are treated as 0.
///
/// # Errors
/// `InvalidArgument` if `top_k` is 0 or the slices differ in length.
pub fn rank<'a>(
    entries: &'a [CatalogEntry],
    scores: &[f32],
    top_k: usize,
) -> Result<Vec<ScoredCandidate<'a>>> {
    if top_k == 0 {
        return Err(Error::InvalidArgument("top_k must be at least 1".to_string()));
    }
    if entries.len() != scores.len() {
        return Err(Error::InvalidArgument(format!(
            "got {} scores for {} entries",
            scores.len(),
            entries.len()
        )));
    }

    let mut candidates: Vec<ScoredCandidate<'a>> = entries
        .iter()
        .zip(scores)
        .enumerate()
        .map(|(index, (entry, &score))| ScoredCandidate {
            index,
            entry,
            score: if score.is_finite() { score } else { 0.0 },
        })
        .collect();

    // stable: ties stay in load order
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut seen = HashSet::new();
    Ok(candidates
        .into_iter()
        .filter(|c| seen.insert(c.entry.url.as_str()))
        .take(top_k)
        .collect())
}
