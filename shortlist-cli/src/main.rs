//! Shortlist CLI - assessment recommendations from the command line
//!
//! # Commands
//!
//! ```bash
//! # Recommend assessments for a job description
//! shortlist --catalog data/catalog.csv recommend "Java developer who collaborates well" -k 5
//!
//! # Same, as the HTTP-style JSON body
//! shortlist --catalog data/catalog.csv recommend "Java developer" --format api
//!
//! # Batch: one row per (query, recommended url)
//! shortlist --catalog data/catalog.csv export --input queries.csv --output predictions.csv
//!
//! # Show how a piece of text is represented
//! shortlist --catalog data/catalog.csv inspect "Java developer"
//! ```
//!
//! `--catalog`, `--config` and `--backend` can also be set through
//! `SHORTLIST_CATALOG`, `SHORTLIST_CONFIG` and `SHORTLIST_BACKEND` (a `.env`
//! file in the working directory is read at startup).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shortlist_lib::{
    config::{Backend, EngineConfig},
    engine::{Projection, RecommendationEngine},
    text::normalize,
};
use tracing_subscriber::EnvFilter;

mod export;
mod output;

#[derive(Parser)]
#[command(name = "shortlist")]
#[command(about = "Recommend assessments from a catalog for a job description")]
#[command(version)]
struct Cli {
    /// Catalog CSV (columns: name, url, and optionally description, test_type, ...)
    #[arg(long, global = true, env = "SHORTLIST_CATALOG")]
    catalog: Option<PathBuf>,

    /// JSON engine config; flags override its values
    #[arg(long, global = true, env = "SHORTLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Vector backend: "tfidf" or "bge"
    #[arg(long, global = true, env = "SHORTLIST_BACKEND")]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Api,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend assessments for a query
    Recommend {
        /// Job description or requirement
        query: String,

        /// Number of results (defaults to the config's default_top_k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Include every catalog field, not just name and url
        #[arg(long)]
        full: bool,
    },

    /// Recommend for every query in a CSV and write Query,Assessment_url rows
    Export {
        /// Input CSV with a query column
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Number of results per query (defaults to the config's default_top_k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Name of the query column in the input
        #[arg(long, default_value = "Query")]
        query_column: String,
    },

    /// Show the normalized tokens and vector stats for a piece of text
    Inspect {
        /// Text to encode
        text: String,
    },
}

fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(backend) = &cli.backend {
        config.backend = backend.parse::<Backend>()?;
    }
    Ok(config)
}

fn load_engine(config: EngineConfig) -> Result<RecommendationEngine> {
    if config.backend == Backend::Bge {
        eprintln!("Loading BGE model (first run downloads ~130MB)...");
    }
    RecommendationEngine::from_config(config).context("failed to build recommendation engine")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = engine_config(&cli)?;

    match cli.command {
        Commands::Recommend {
            query,
            k,
            format,
            full,
        } => {
            let engine = load_engine(config)?;
            let top_k = k.unwrap_or(engine.config().default_top_k);
            let projection = if full { Projection::Full } else { Projection::Summary };

            let result = engine.recommend(&query, top_k)?;

            match format {
                Format::Text => print!("{}", output::text(&result, projection)),
                Format::Json => println!("{}", output::json(&query, &result, projection)?),
                Format::Api => println!("{}", output::api(&result)?),
            }
        }

        Commands::Export {
            input,
            output,
            k,
            query_column,
        } => {
            let engine = Arc::new(load_engine(config)?);
            let top_k = k.unwrap_or(engine.config().default_top_k);

            let summary = export::run(engine, &input, &output, &query_column, top_k).await?;
            println!(
                "Wrote {} rows for {} queries to '{}' ({} blank skipped)",
                summary.rows,
                summary.queries,
                output.display(),
                summary.skipped
            );
        }

        Commands::Inspect { text } => {
            let engine = load_engine(config)?;
            let repr = engine.encode(&text)?;

            let norm = repr.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            let non_zero = repr.vector.iter().filter(|x| **x != 0.0).count();
            let tokens: Vec<&str> = repr.tokens.iter().collect();

            println!("Normalized: {}", normalize(&text));
            println!("Tokens ({}): {}", tokens.len(), tokens.join(", "));
            println!("\nVector stats ({}):", engine.embedder().model_name());
            println!("  Dimensions: {}", repr.vector.len());
            println!("  Non-zero: {non_zero}");
            println!("  Norm: {norm:.4}");
            println!("  Min: {:.4}", repr.vector.iter().cloned().fold(f32::INFINITY, f32::min));
            println!("  Max: {:.4}", repr.vector.iter().cloned().fold(f32::NEG_INFINITY, f32::max));
        }
    }

    Ok(())
}
