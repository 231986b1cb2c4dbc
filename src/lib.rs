//! shopsearch - faceted product search over Elasticsearch
//!
//! Free text plus selected facet filters become a single engine request
//! under one of three facet consistency modes.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod executor;
pub mod http_server;
pub mod observability;
pub mod search;
