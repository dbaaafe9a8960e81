//! Shortlist - assessment catalog recommendation engine
//!
//! # Architecture
//!
//! ```text
//! Catalog -> Representer -> entry vectors + token sets (built once)
//!                                   |
//! Query -> Representer -> Scorer <--+
//!                           |
//!                         Ranker -> top_k recommendations
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shortlist_lib::{catalog::Catalog, config::EngineConfig, engine::RecommendationEngine};
//!
//! // Build once at startup
//! let catalog = Catalog::from_csv_path("data/catalog.csv")?;
//! let engine = RecommendationEngine::build(catalog, EngineConfig::default())?;
//!
//! // Query many times, from any thread
//! let result = engine.recommend("Need a Java developer who collaborates well", 10)?;
//! for rec in &result {
//!     println!("{} {}", rec.name(), rec.url());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod embed;
pub mod engine;
pub mod error;
pub mod rank;
pub mod score;
pub mod text;

pub use error::{Error, ErrorKind, Result};
