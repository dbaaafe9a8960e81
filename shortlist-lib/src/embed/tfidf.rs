use std::collections::{HashMap, HashSet};

use crate::embed::{Embedder, Embedding};
use crate::text::{is_stop_word, tokens};
use crate::Result;

/// TF-IDF embedder fitted on the catalog corpus.
///
/// Vocabulary indices are assigned in first-seen order across the corpus, so
/// the same corpus always produces the same vector layout. Weights are raw
/// term counts times smoothed IDF `ln((1 + N) / (1 + df)) + 1`, and every
/// vector is L2-normalized.
#[derive(Debug, Clone)]
pub struct TfIdfEmbedder {
    /// term -> dimension index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f32>,
    stop_words: bool,
}

impl TfIdfEmbedder {
    /// Fit vocabulary and IDF weights on `documents`.
    ///
    /// With `stop_words` set, common English words are left out of the
    /// vocabulary.
    #[must_use]
    pub fn from_corpus(documents: &[&str], stop_words: bool) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for document in documents {
            let mut seen = HashSet::new();
            for term in terms(document, stop_words) {
                if !seen.insert(term.clone()) {
                    continue;
                }
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                doc_freq[idx] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            "fitted tf-idf vocabulary"
        );

        Self {
            vocabulary,
            idf,
            stop_words,
        }
    }

    fn vectorize(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.idf.len()];
        for term in terms(text, self.stop_words) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += self.idf[idx];
            }
        }
        normalize(&mut vector);
        vector
    }
}

impl Embedder for TfIdfEmbedder {
    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn embed_query(&self, text: &str) -> Result<Embedding> {
        Ok(self.vectorize(text))
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn model_name(&self) -> &str {
        "tfidf"
    }
}

fn terms(text: &str, stop_words: bool) -> impl Iterator<Item = String> {
    tokens(text)
        .into_iter()
        .filter(move |t| !(stop_words && is_stop_word(t)))
}

/// Scale `vector` to unit length in place. Zero vectors are left alone.
fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}
