//! Batch export: one recommendation list per input query, written long-format
//! as `Query,Assessment_url` rows.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use shortlist_lib::embed::Embedder;
use shortlist_lib::engine::RecommendationEngine;

/// Totals reported after an export.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub queries: usize,
    pub skipped: usize,
    pub rows: usize,
}

/// Read queries from `input`, recommend `top_k` for each and write `output`.
///
/// Queries run concurrently on the blocking pool against the shared engine;
/// rows are written in input order. Blank queries are skipped. `output` is
/// only created once every query has succeeded, so a failed run leaves an
/// existing file untouched.
pub async fn run<E: Embedder + 'static>(
    engine: Arc<RecommendationEngine<E>>,
    input: &Path,
    output: &Path,
    query_column: &str,
    top_k: usize,
) -> Result<ExportSummary> {
    if top_k == 0 {
        bail!("top_k must be at least 1");
    }

    let queries = read_queries(input, query_column)?;
    let mut summary = ExportSummary::default();

    let mut tasks = Vec::with_capacity(queries.len());
    for (row, query) in queries.into_iter().enumerate() {
        if query.trim().is_empty() {
            tracing::warn!(row = row + 1, "skipping blank query");
            summary.skipped += 1;
            continue;
        }

        let engine = Arc::clone(&engine);
        tasks.push(tokio::task::spawn_blocking(move || {
            let urls = engine.recommend(&query, top_k).map(|result| {
                result
                    .urls()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });
            (query, urls)
        }));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let (query, urls) = task.await.context("recommendation task panicked")?;
        let urls = urls.with_context(|| format!("failed to recommend for query '{query}'"))?;
        results.push((query, urls));
    }

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    writer.write_record(["Query", "Assessment_url"])?;

    for (query, urls) in &results {
        for url in urls {
            writer.write_record([query.as_str(), url.as_str()])?;
        }
        summary.queries += 1;
        summary.rows += urls.len();
    }
    writer.flush()?;

    tracing::info!(
        queries = summary.queries,
        skipped = summary.skipped,
        rows = summary.rows,
        output = %output.display(),
        "export complete"
    );
    Ok(summary)
}

fn read_queries(input: &Path, query_column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("failed to open '{}'", input.display()))?;

    let headers = reader.headers()?.clone();
    let Some(column) = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(query_column))
    else {
        bail!(
            "'{}' has no '{query_column}' column (found: {})",
            input.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    };

    let mut queries = Vec::new();
    for record in reader.records() {
        let record = record?;
        queries.push(record.get(column).unwrap_or_default().to_string());
    }
    Ok(queries)
}
