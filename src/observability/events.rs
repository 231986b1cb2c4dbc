//! Observable events
//!
//! Every log line carries one of these names in its `event` field, so logs
//! can be filtered by what happened rather than by message text.

use std::fmt;

/// Observable events in shopsearch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server listening
    Serving,

    // Search
    /// Request typed and planned
    SearchPlanned,
    /// Request rejected before reaching the engine
    SearchRejected,
    /// Encoded query sent to the engine
    SearchDispatched,
    /// Engine answered with success
    SearchExecuted,
    /// Transport or engine failure
    SearchFailed,

    // Catalog
    /// Existing index dropped
    IndexDeleted,
    /// Index created with settings and mappings
    IndexCreated,
    /// One bulk chunk sent
    BulkChunkIndexed,
    /// Bulk response reported item failures
    BulkItemsFailed,
    /// Indexing run finished
    IndexingComplete,
    /// Synonym filter updated
    SynonymsConfigured,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SHOPSEARCH_SERVING",

            Event::SearchPlanned => "SEARCH_PLANNED",
            Event::SearchRejected => "SEARCH_REJECTED",
            Event::SearchDispatched => "SEARCH_DISPATCHED",
            Event::SearchExecuted => "SEARCH_COMPLETE",
            Event::SearchFailed => "SEARCH_FAILED",

            Event::IndexDeleted => "INDEX_DELETED",
            Event::IndexCreated => "INDEX_CREATED",
            Event::BulkChunkIndexed => "BULK_CHUNK_INDEXED",
            Event::BulkItemsFailed => "BULK_ITEMS_FAILED",
            Event::IndexingComplete => "INDEXING_COMPLETE",
            Event::SynonymsConfigured => "SYNONYMS_CONFIGURED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SearchRejected | Event::SearchFailed | Event::BulkItemsFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
