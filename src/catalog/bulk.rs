//! Bulk request batching
//!
//! Products are serialized into NDJSON action/source pairs and grouped into
//! chunks that stay under a byte limit. A single document larger than the
//! limit still forms its own chunk.

use serde_json::json;

use super::errors::CatalogResult;
use super::product::Product;

/// Default chunk limit, 5 MiB
pub const DEFAULT_MAX_BULK_BYTES: usize = 5 * 1024 * 1024;

/// A ready-to-send `_bulk` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkChunk {
    pub body: String,
    pub documents: usize,
}

impl BulkChunk {
    pub fn len_bytes(&self) -> usize {
        self.body.len()
    }
}

/// Accumulates products until the byte limit would be exceeded
#[derive(Debug)]
pub struct BulkBatcher {
    max_bytes: usize,
    buffer: String,
    documents: usize,
}

impl BulkBatcher {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            buffer: String::new(),
            documents: 0,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn pending_documents(&self) -> usize {
        self.documents
    }

    /// Adds a product. Returns the previous chunk when this product would
    /// push it past the limit.
    pub fn push(&mut self, product: &Product) -> CatalogResult<Option<BulkChunk>> {
        let entry = encode_entry(product)?;

        let flushed = if self.documents > 0 && self.buffer.len() + entry.len() > self.max_bytes {
            Some(self.take())
        } else {
            None
        };

        self.buffer.push_str(&entry);
        self.documents += 1;
        Ok(flushed)
    }

    /// Drains whatever is buffered. Returns `None` when nothing is pending.
    pub fn finish(&mut self) -> Option<BulkChunk> {
        if self.documents == 0 {
            None
        } else {
            Some(self.take())
        }
    }

    fn take(&mut self) -> BulkChunk {
        let chunk = BulkChunk {
            body: std::mem::take(&mut self.buffer),
            documents: self.documents,
        };
        self.documents = 0;
        chunk
    }
}

impl Default for BulkBatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BULK_BYTES)
    }
}

/// Action line plus source line, both newline-terminated
fn encode_entry(product: &Product) -> CatalogResult<String> {
    let action = json!({ "index": { "_id": product.id } });
    let source = serde_json::to_string(product)?;
    Ok(format!("{}\n{}\n", action, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductGenerator;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn products(n: usize) -> Vec<Product> {
        ProductGenerator::new(StdRng::seed_from_u64(1), Utc::now())
            .take(n)
            .collect()
    }

    #[test]
    fn test_entry_format() {
        let product = &products(1)[0];
        let entry = encode_entry(product).unwrap();
        let lines: Vec<&str> = entry.lines().collect();

        assert_eq!(lines.len(), 2);
        let action: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action["index"]["_id"], product.id.as_str());
        let source: Product = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(&source, product);
        assert!(entry.ends_with('\n'));
    }

    #[test]
    fn test_single_chunk_under_limit() {
        let mut batcher = BulkBatcher::default();
        for product in products(25) {
            assert!(batcher.push(&product).unwrap().is_none());
        }

        let chunk = batcher.finish().unwrap();
        assert_eq!(chunk.documents, 25);
        assert_eq!(chunk.body.lines().count(), 50);
        assert!(batcher.finish().is_none());
    }

    #[test]
    fn test_chunks_respect_limit() {
        let items = products(100);
        let mut batcher = BulkBatcher::new(2_000);
        let mut chunks = Vec::new();

        for product in &items {
            if let Some(chunk) = batcher.push(product).unwrap() {
                chunks.push(chunk);
            }
        }
        chunks.extend(batcher.finish());

        assert!(chunks.len() > 1);
        assert_eq!(chunks.iter().map(|c| c.documents).sum::<usize>(), 100);
        for chunk in &chunks {
            assert!(chunk.len_bytes() <= 2_000);
        }
    }

    #[test]
    fn test_oversized_document_gets_own_chunk() {
        let items = products(3);
        let mut batcher = BulkBatcher::new(10);

        assert!(batcher.push(&items[0]).unwrap().is_none());
        let first = batcher.push(&items[1]).unwrap().unwrap();
        assert_eq!(first.documents, 1);
        assert_eq!(batcher.pending_documents(), 1);
    }

    #[test]
    fn test_empty_batcher_finishes_with_none() {
        let mut batcher = BulkBatcher::new(1024);
        assert!(batcher.finish().is_none());
    }
}
