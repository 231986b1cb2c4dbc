//! Catalog subsystem for shopsearch
//!
//! Owns everything that writes to the product index:
//! - synthetic product generation
//! - NDJSON bulk batching under a byte limit
//! - index recreation from the bundled settings and mappings
//! - synonym filter updates (close, put settings, reopen)
//!
//! Reads go through `executor`; this module never searches.

mod bulk;
mod errors;
mod generator;
mod indexer;
mod product;

pub use bulk::{BulkBatcher, BulkChunk, DEFAULT_MAX_BULK_BYTES};
pub use errors::{CatalogError, CatalogResult};
pub use generator::{ProductGenerator, BRANDS_MAX, NON_EXISTING_IMAGE_IDS};
pub use indexer::{index_definition, parse_synonyms, CatalogIndexer, IndexingReport, SYNONYMS_SETTING};
pub use product::Product;
