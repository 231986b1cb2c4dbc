//! Query Executor subsystem for shopsearch
//!
//! Serializes search plans to the engine's JSON query language and sends
//! them over HTTP. The engine is a black box; its responses are passed
//! through unmodified.
//!
//! # Execution Flow (strict order)
//!
//! 1. Encode the plan (`wire`)
//! 2. Send one request (`client`)
//! 3. Map non-2xx statuses and transport failures to `ExecutionError`
//!
//! No retry, no backoff, no cancellation.

mod client;
mod errors;
mod executor;
mod result;
pub mod wire;

pub use client::EngineClient;
pub use errors::{ExecutionError, ExecutionResult};
pub use executor::{ElasticsearchExecutor, QueryExecutor};
pub use result::RawResponse;
pub use wire::encode_search_body;
