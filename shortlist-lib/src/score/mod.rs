//! Relevance scoring
//!
//! A candidate's score blends two signals:
//!
//! - **semantic**: cosine similarity of query and entry vectors, floored at 0
//! - **lexical**: share of query words that appear in the entry's token set
//!
//! ```text
//! score = (w_semantic * max(cos, 0) + w_lexical * overlap) / (w_semantic + w_lexical)
//! ```
//!
//! Both signals lie in [0, 1], so the score does too. Degenerate inputs (zero
//! or empty vectors, mismatched dimensions, non-finite values) score 0; a zero
//! vector on either side also zeroes the lexical term.

use serde::{Deserialize, Serialize};

use crate::embed::Representation;
use crate::{Error, Result};

/// Blend weights for the two relevance signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of vector cosine similarity
    pub semantic: f32,
    /// Weight of token-set overlap
    pub lexical: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: 0.8,
            lexical: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Pure vector similarity, no lexical term.
    #[must_use]
    pub fn semantic_only() -> Self {
        Self {
            semantic: 1.0,
            lexical: 0.0,
        }
    }

    /// Weights must be finite, non-negative, and not both zero.
    pub fn validate(&self) -> Result<()> {
        let valid = |w: f32| w.is_finite() && w >= 0.0;
        if !valid(self.semantic) || !valid(self.lexical) {
            return Err(Error::Config(format!(
                "score weights must be finite and non-negative, got semantic={} lexical={}",
                self.semantic, self.lexical
            )));
        }
        if self.semantic + self.lexical <= 0.0 {
            return Err(Error::Config(
                "at least one score weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scores a query representation against catalog entry representations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    /// Create a scorer, rejecting invalid weights.
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[must_use]
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Relevance of `entry` to `query`, in [0, 1].
    ///
    /// 0 whenever either vector is empty or all zero, whatever the token
    /// overlap.
    #[must_use]
    pub fn score(&self, query: &Representation, entry: &Representation) -> f32 {
        if query.is_zero_vector() || entry.is_zero_vector() {
            return 0.0;
        }

        let ScoreWeights { semantic, lexical } = self.weights;

        let cosine = cosine_similarity(&query.vector, &entry.vector).max(0.0);
        let overlap = query.tokens.overlap(&entry.tokens);

        let score = (semantic * cosine + lexical * overlap) / (semantic + lexical);
        if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Score every entry, in entry order.
    #[must_use]
    pub fn score_all(&self, query: &Representation, entries: &[Representation]) -> Vec<f32> {
        entries.iter().map(|e| self.score(query, e)).collect()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 means identical direction. Empty,
/// zero, mismatched or non-finite inputs give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() { sim.clamp(-1.0, 1.0) } else { 0.0 }
}
