//! Recommendation engine
//!
//! Combines catalog, representer, scorer and ranker behind one call.
//!
//! Construction loads and vectorizes the whole catalog; after that the engine
//! is immutable and `recommend` only reads, so one instance can be shared
//! (e.g. in an `Arc`) across threads for the life of the process.
//!
//! # Usage
//!
//! ```ignore
//! use shortlist_lib::{catalog::Catalog, config::EngineConfig, engine::RecommendationEngine};
//!
//! let catalog = Catalog::from_csv_path("data/catalog.csv")?;
//! let engine = RecommendationEngine::build(catalog, EngineConfig::default())?;
//!
//! for rec in &engine.recommend("Java developer who collaborates well", 5)? {
//!     println!("{}. {} <{}>", rec.rank, rec.name(), rec.url());
//! }
//! ```

use std::time::Instant;

use crate::catalog::Catalog;
use crate::config::{Backend, EngineConfig};
use crate::embed::{BgeEmbedder, Embedder, Representation, Representer, TfIdfEmbedder};
use crate::rank::rank;
use crate::score::Scorer;
use crate::{Error, Result};

/// Immutable catalog index answering `recommend` queries.
pub struct RecommendationEngine<E: Embedder = Box<dyn Embedder>> {
    catalog: Catalog,
    representer: Representer<E>,
    /// One representation per catalog entry, in catalog order
    entries: Vec<Representation>,
    scorer: Scorer,
    config: EngineConfig,
}

impl RecommendationEngine<TfIdfEmbedder> {
    /// Build an engine whose TF-IDF vocabulary is fitted on this catalog.
    pub fn tfidf(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        let embedder = fit_tfidf(&catalog, &config);
        Self::new(catalog, embedder, config)
    }
}

impl RecommendationEngine {
    /// Build an engine with the backend named in `config`.
    pub fn build(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        match config.backend {
            Backend::TfIdf => {
                let embedder = fit_tfidf(&catalog, &config);
                Self::new(catalog, Box::new(embedder), config)
            }
            Backend::Bge => {
                let embedder = BgeEmbedder::new()?;
                Self::new(catalog, Box::new(embedder), config)
            }
        }
    }

    /// Load the catalog named by `config.catalog_path` and build an engine.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let path = config
            .catalog_path
            .clone()
            .ok_or_else(|| Error::Config("catalog_path is not set".to_string()))?;
        let catalog = Catalog::from_csv_path(path)?;

        Self::build(catalog, config)
    }
}

impl<E: Embedder> RecommendationEngine<E> {
    /// Build an engine from a loaded catalog and a ready embedder.
    ///
    /// Every entry is encoded here, once.
    pub fn new(catalog: Catalog, embedder: E, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(Error::CatalogLoad("catalog has no entries".to_string()));
        }

        let started = Instant::now();
        let scorer = Scorer::new(config.weights)?;
        let representer = Representer::new(embedder);

        let texts = entry_texts(&catalog, &config);
        let corpus: Vec<&str> = texts.iter().map(String::as_str).collect();
        let entries = representer.encode_all(&corpus)?;

        if entries.len() != catalog.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} entries",
                entries.len(),
                catalog.len()
            )));
        }

        tracing::info!(
            entries = catalog.len(),
            model = representer.embedder().model_name(),
            dimension = representer.embedder().dimension(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recommendation engine ready"
        );

        Ok(Self {
            catalog,
            representer,
            entries,
            scorer,
            config,
        })
    }

    /// Rank catalog entries for `query`, returning at most `top_k`.
    ///
    /// # Errors
    /// - `EmptyQuery` if `query` is blank
    /// - `InvalidArgument` if `top_k` is 0
    pub fn recommend(&self, query: &str, top_k: usize) -> Result<RecommendationResult<'_>> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        if top_k == 0 {
            return Err(Error::InvalidArgument("top_k must be at least 1".to_string()));
        }

        let scores = self.scores(query)?;
        let ranked = rank(self.catalog.entries(), &scores, top_k)?;

        tracing::debug!(
            top_k,
            candidates = scores.len(),
            returned = ranked.len(),
            best = ranked.first().map(|c| c.score),
            "recommend"
        );

        Ok(RecommendationResult::new(
            ranked
                .into_iter()
                .enumerate()
                .map(|(i, c)| Recommendation {
                    rank: i + 1,
                    score: c.score,
                    entry: c.entry,
                })
                .collect(),
        ))
    }

    /// [`recommend`](Self::recommend) with the configured `default_top_k`.
    pub fn recommend_default(&self, query: &str) -> Result<RecommendationResult<'_>> {
        self.recommend(query, self.config.default_top_k)
    }

    /// Relevance of every catalog entry to `query`, in catalog order.
    pub fn scores(&self, query: &str) -> Result<Vec<f32>> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let query = self.representer.encode(query)?;
        Ok(self.scorer.score_all(&query, &self.entries))
    }

    /// Encode arbitrary text with this engine's representer.
    pub fn encode(&self, text: &str) -> Result<Representation> {
        self.representer.encode(text)
    }

    /// Returns the number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Always `false` for a constructed engine.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn embedder(&self) -> &E {
        self.representer.embedder()
    }
}

/// Matching text of every entry, in catalog order.
fn entry_texts(catalog: &Catalog, config: &EngineConfig) -> Vec<String> {
    catalog.iter().map(|e| e.text(&config.fields)).collect()
}

fn fit_tfidf(catalog: &Catalog, config: &EngineConfig) -> TfIdfEmbedder {
    let texts = entry_texts(catalog, config);
    let corpus: Vec<&str> = texts.iter().map(String::as_str).collect();
    TfIdfEmbedder::from_corpus(&corpus, config.stop_words)
}

mod result;

pub use result::*;
