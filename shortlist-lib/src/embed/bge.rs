use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::embed::{Embedder, Embedding};
use crate::{Error, Result};

const DIMENSION: usize = 384;

/// BGE embedder using BAAI/bge-small-en-v1.5.
///
/// Uses fastembed for ONNX-based inference. This model produces 384-dimensional
/// embeddings and supports up to 512 tokens per input.
///
/// fastembed needs `&mut` to run inference, so the model sits behind a mutex
/// and concurrent queries are serialized on it.
pub struct BgeEmbedder {
    model: Mutex<TextEmbedding>,
}

impl BgeEmbedder {
    /// Create a new BGE embedder.
    ///
    /// Downloads the model on first use (~130MB).
    pub fn new() -> Result<Self> {
        let opts = InitOptions::new(EmbeddingModel::BGESmallENV15)
            .with_show_download_progress(true);

        TextEmbedding::try_new(opts)
            .map(|model| Self {
                model: Mutex::new(model),
            })
            .map_err(|e| Error::Embedding(e.to_string()))
    }

    fn run(&self, texts: Vec<String>) -> Result<Vec<Embedding>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| Error::Embedding("embedding model lock poisoned".to_string()))?;

        model
            .embed(texts, None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

impl Embedder for BgeEmbedder {
    fn model_name(&self) -> &str {
        "BAAI/bge-small-en-v1.5"
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        // Blank documents get a zero vector instead of a model call
        let (indices, batch): (Vec<usize>, Vec<String>) = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.trim().is_empty())
            .map(|(i, t)| (i, t.to_string()))
            .unzip();

        let mut out = vec![vec![0.0; DIMENSION]; texts.len()];
        if batch.is_empty() {
            return Ok(out);
        }

        for (i, embedding) in indices.into_iter().zip(self.run(batch)?) {
            out[i] = embedding;
        }
        Ok(out)
    }

    fn embed_query(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; DIMENSION]);
        }

        // BGE uses a special prompt prefix for queries to improve retrieval
        let query_text = format!("Represent this sentence for searching relevant passages: {text}");

        self.run(vec![query_text])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("model returned no embeddings".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::cosine_similarity;

    #[test]
    #[ignore] // Requires model download, run with: cargo test -- --ignored
    fn test_related_text_is_closer() {
        let embedder = BgeEmbedder::new().unwrap();

        let docs = embedder
            .embed_documents(&[
                "Java programming assessment for software engineers",
                "Leadership and teamwork personality questionnaire",
            ])
            .unwrap();
        let query = embedder.embed_query("Need a Java developer").unwrap();

        assert_eq!(query.len(), DIMENSION);
        assert!(cosine_similarity(&query, &docs[0]) > cosine_similarity(&query, &docs[1]));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_blank_document_is_zero() {
        let embedder = BgeEmbedder::new().unwrap();
        let docs = embedder.embed_documents(&["Java", "   "]).unwrap();

        assert_eq!(docs.len(), 2);
        assert!(docs[1].iter().all(|x| *x == 0.0));
        assert!(docs[0].iter().any(|x| *x != 0.0));
    }
}
