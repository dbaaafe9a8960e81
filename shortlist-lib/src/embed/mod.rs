//! Text vectors for queries and catalog entries
//!
//! Two backends implement [`Embedder`]:
//!
//! - [`TfIdfEmbedder`]: fitted on the catalog corpus at construction time.
//!   Deterministic, no model download, dimension = vocabulary size.
//! - [`BgeEmbedder`]: BAAI/bge-small-en-v1.5 via fastembed (ONNX runtime),
//!   384 dimensions, downloads the model on first use.
//!
//! [`Representer`] pairs a backend with [`TokenSet`] extraction so callers get
//! both the vector and the lexical signal from one call.
//!
//! # Usage
//!
//! ```ignore
//! use shortlist_lib::embed::{Embedder, Representer, TfIdfEmbedder};
//!
//! let embedder = TfIdfEmbedder::from_corpus(&["java programming", "leadership"], true);
//! let representer = Representer::new(embedder);
//!
//! let docs = representer.encode_all(&["java programming", "leadership"])?;
//! let query = representer.encode("java developer")?;
//! ```

use crate::text::TokenSet;
use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding backends
///
/// Implementations must be deterministic (same text, same vector) and must
/// be callable through `&self` from several threads at once.
pub trait Embedder: Send + Sync {
    /// Embed multiple documents for indexing
    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Embed a single query for searching
    ///
    /// Note: Some models (like BGE) use different prompts for queries vs documents.
    /// This method handles that distinction.
    fn embed_query(&self, text: &str) -> Result<Embedding>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        (**self).embed_documents(texts)
    }

    fn embed_query(&self, text: &str) -> Result<Embedding> {
        (**self).embed_query(text)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Vector plus token set for one piece of text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    pub vector: Embedding,
    pub tokens: TokenSet,
}

impl Representation {
    /// Representation of empty text: all-zero vector, no tokens.
    #[must_use]
    pub fn zero(dimension: usize) -> Self {
        Self {
            vector: vec![0.0; dimension],
            tokens: TokenSet::default(),
        }
    }

    /// `true` if every vector component is zero.
    #[must_use]
    pub fn is_zero_vector(&self) -> bool {
        self.vector.iter().all(|x| *x == 0.0)
    }
}

/// Turns text into [`Representation`]s using an [`Embedder`].
pub struct Representer<E: Embedder> {
    embedder: E,
}

impl<E: Embedder> Representer<E> {
    #[must_use]
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// Encode query text.
    ///
    /// Blank text short-circuits to [`Representation::zero`] without touching
    /// the backend.
    pub fn encode(&self, text: &str) -> Result<Representation> {
        if text.trim().is_empty() {
            return Ok(Representation::zero(self.embedder.dimension()));
        }

        Ok(Representation {
            vector: self.embedder.embed_query(text)?,
            tokens: TokenSet::from_text(text),
        })
    }

    /// Encode catalog texts, one representation per input, in order.
    pub fn encode_all(&self, texts: &[&str]) -> Result<Vec<Representation>> {
        let vectors = self.embedder.embed_documents(texts)?;

        Ok(texts
            .iter()
            .zip(vectors)
            .map(|(text, vector)| Representation {
                vector,
                tokens: TokenSet::from_text(text),
            })
            .collect())
    }

    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

mod bge;
mod tfidf;

pub use bge::*;
pub use tfidf::*;
