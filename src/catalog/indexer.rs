//! Index lifecycle
//!
//! Recreates the product index from the bundled settings and mappings, fills
//! it with generated products, and rewrites the synonym filter in place.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::executor::EngineClient;
use crate::observability::{Event, SearchMetrics};

use super::bulk::{BulkBatcher, BulkChunk, DEFAULT_MAX_BULK_BYTES};
use super::errors::{CatalogError, CatalogResult};
use super::generator::ProductGenerator;

const INDEX_SETTINGS: &str = include_str!("index-settings.json");
const INDEX_MAPPINGS: &str = include_str!("index-mappings.json");

/// Settings key holding the synonym rules
pub const SYNONYMS_SETTING: &str = "index.analysis.filter.my_synonym_filter.synonyms";

/// Outcome of one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexingReport {
    pub documents: usize,
    pub chunks: usize,
    pub failed_items: usize,
}

/// Builds the `PUT /{index}` body from the bundled resources
pub fn index_definition() -> CatalogResult<Value> {
    let settings = parse_resource("index-settings.json", INDEX_SETTINGS)?;
    let mappings = parse_resource("index-mappings.json", INDEX_MAPPINGS)?;
    Ok(json!({ "settings": settings, "mappings": mappings }))
}

fn parse_resource(name: &'static str, raw: &str) -> CatalogResult<Value> {
    let value: Value = serde_json::from_str(raw).map_err(|e| CatalogError::InvalidResource {
        name,
        reason: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(CatalogError::InvalidResource {
            name,
            reason: "expected a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// One synonym rule per non-blank line, trimmed
pub fn parse_synonyms(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts items the engine rejected inside an otherwise successful `_bulk`
fn failed_items(response: &Value) -> usize {
    if response.get("errors").and_then(Value::as_bool) != Some(true) {
        return 0;
    }
    response
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| {
                    item.as_object()
                        .and_then(|actions| actions.values().next())
                        .map(|result| result.get("error").is_some())
                        .unwrap_or(false)
                })
                .count()
        })
        .unwrap_or(0)
}

/// Manages the product index
#[derive(Debug, Clone)]
pub struct CatalogIndexer {
    client: EngineClient,
    index: String,
    max_bulk_bytes: usize,
    metrics: Arc<SearchMetrics>,
}

impl CatalogIndexer {
    pub fn new(client: EngineClient, index: impl Into<String>, metrics: Arc<SearchMetrics>) -> Self {
        Self {
            client,
            index: index.into(),
            max_bulk_bytes: DEFAULT_MAX_BULK_BYTES,
            metrics,
        }
    }

    pub fn with_max_bulk_bytes(mut self, max_bulk_bytes: usize) -> Self {
        self.max_bulk_bytes = max_bulk_bytes;
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Recreates the index and fills it with `count` random products
    pub async fn index_products(&self, count: usize) -> CatalogResult<IndexingReport> {
        let generator = ProductGenerator::new(StdRng::from_entropy(), Utc::now());
        self.index_generated(generator, count).await
    }

    /// Same as [`index_products`](Self::index_products) with a caller-supplied generator
    pub async fn index_generated<R: Rng + Send>(
        &self,
        generator: ProductGenerator<R>,
        count: usize,
    ) -> CatalogResult<IndexingReport> {
        self.recreate_index().await?;

        let mut batcher = BulkBatcher::new(self.max_bulk_bytes);
        let mut pending: Option<BulkChunk> = None;
        let mut report = IndexingReport::default();

        for product in generator.take(count) {
            if let Some(full) = batcher.push(&product)? {
                // The newest chunk is held back so only the final one refreshes
                if let Some(previous) = pending.replace(full) {
                    self.send_chunk(previous, false, &mut report).await?;
                }
            }
        }
        if let Some(rest) = batcher.finish() {
            if let Some(previous) = pending.replace(rest) {
                self.send_chunk(previous, false, &mut report).await?;
            }
        }

        match pending {
            Some(last) => self.send_chunk(last, true, &mut report).await?,
            None => self
                .client
                .refresh_index(&self.index)
                .await
                .map_err(|e| CatalogError::engine("refresh_index", e))?,
        }

        tracing::info!(
            event = %Event::IndexingComplete,
            index = %self.index,
            documents = report.documents,
            chunks = report.chunks,
            failed_items = report.failed_items,
            "indexing complete"
        );
        Ok(report)
    }

    async fn recreate_index(&self) -> CatalogResult<()> {
        let exists = self
            .client
            .index_exists(&self.index)
            .await
            .map_err(|e| CatalogError::engine("index_exists", e))?;

        if exists {
            self.client
                .delete_index(&self.index)
                .await
                .map_err(|e| CatalogError::engine("delete_index", e))?;
            tracing::info!(event = %Event::IndexDeleted, index = %self.index, "index deleted");
        }

        let definition = index_definition()?;
        self.client
            .create_index(&self.index, &definition)
            .await
            .map_err(|e| CatalogError::engine("create_index", e))?;
        tracing::info!(event = %Event::IndexCreated, index = %self.index, "index created");
        Ok(())
    }

    async fn send_chunk(
        &self,
        chunk: BulkChunk,
        refresh: bool,
        report: &mut IndexingReport,
    ) -> CatalogResult<()> {
        let documents = chunk.documents;
        let bytes = chunk.len_bytes();
        let response = self
            .client
            .bulk(&self.index, chunk.body, refresh)
            .await
            .map_err(|e| CatalogError::engine("bulk", e))?;

        let failed = failed_items(&response);
        if failed > 0 {
            tracing::warn!(
                event = %Event::BulkItemsFailed,
                index = %self.index,
                failed,
                "bulk chunk had rejected items"
            );
        }

        report.documents += documents;
        report.chunks += 1;
        report.failed_items += failed;
        self.metrics.record_bulk_chunk(documents as u64);

        tracing::debug!(
            event = %Event::BulkChunkIndexed,
            documents,
            bytes,
            refresh,
            "bulk chunk indexed"
        );
        Ok(())
    }

    /// Replaces the synonym rules. The index is closed for the update and
    /// reopened afterwards even when the update fails.
    pub async fn configure_synonyms(&self, text: &str) -> CatalogResult<usize> {
        let synonyms = parse_synonyms(text);
        let mut settings = Map::new();
        settings.insert(SYNONYMS_SETTING.to_string(), json!(synonyms));
        let settings = Value::Object(settings);

        self.client
            .close_index(&self.index)
            .await
            .map_err(|e| CatalogError::engine("close_index", e))?;

        let updated = self
            .client
            .put_settings(&self.index, &settings)
            .await
            .map_err(|e| CatalogError::engine("put_settings", e));

        self.client
            .open_index(&self.index)
            .await
            .map_err(|e| CatalogError::engine("open_index", e))?;
        updated?;

        tracing::info!(
            event = %Event::SynonymsConfigured,
            index = %self.index,
            rules = synonyms.len(),
            "synonyms configured"
        );
        Ok(synonyms.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_definition_carries_synonym_filter() {
        let definition = index_definition().unwrap();
        let filter = &definition["settings"]["index"]["analysis"]["filter"]["my_synonym_filter"];
        assert_eq!(filter["type"], "synonym");
        assert_eq!(
            definition["mappings"]["properties"]["brand"]["fields"]["keyword"]["type"],
            "keyword"
        );
        assert_eq!(definition["mappings"]["properties"]["price"]["type"], "double");
    }

    #[test]
    fn test_parse_synonyms() {
        let text = "shirt, tee\n\n  pants, trousers  \n";
        assert_eq!(parse_synonyms(text), vec!["shirt, tee", "pants, trousers"]);
        assert!(parse_synonyms("  \n ").is_empty());
    }

    #[test]
    fn test_failed_items() {
        let ok = json!({"errors": false, "items": [{"index": {"status": 201}}]});
        assert_eq!(failed_items(&ok), 0);

        let partial = json!({
            "errors": true,
            "items": [
                {"index": {"status": 201}},
                {"index": {"status": 400, "error": {"type": "mapper_parsing_exception"}}},
                {"index": {"status": 429, "error": {"type": "es_rejected_execution_exception"}}}
            ]
        });
        assert_eq!(failed_items(&partial), 2);
    }
}
