//! Query executor
//!
//! Execution flow (strict order):
//! 1. Encode the plan into the engine's query language
//! 2. Issue exactly one `_search` call
//! 3. Return the raw engine response, or the transport/engine error

use async_trait::async_trait;

use crate::observability::Event;
use crate::search::QueryPlan;

use super::client::EngineClient;
use super::errors::ExecutionResult;
use super::result::RawResponse;
use super::wire::encode_search_body;

/// Executes search plans against a search engine.
///
/// Each call resolves exactly once. There is no cancellation; callers that
/// need a deadline wrap the future in their own timeout.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, plan: &QueryPlan) -> ExecutionResult<RawResponse>;
}

/// Executor backed by an Elasticsearch index
#[derive(Debug, Clone)]
pub struct ElasticsearchExecutor {
    client: EngineClient,
    index: String,
}

impl ElasticsearchExecutor {
    pub fn new(client: EngineClient, index: impl Into<String>) -> Self {
        Self {
            client,
            index: index.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }
}

#[async_trait]
impl QueryExecutor for ElasticsearchExecutor {
    async fn execute(&self, plan: &QueryPlan) -> ExecutionResult<RawResponse> {
        let body = encode_search_body(plan);
        tracing::info!(
            event = %Event::SearchDispatched,
            index = %self.index,
            mode = %plan.mode,
            query = %body,
            "dispatching search"
        );

        match self.client.search(&self.index, &body).await {
            Ok(response) => {
                tracing::debug!(
                    event = %Event::SearchExecuted,
                    mode = %plan.mode,
                    status = response.status,
                    bytes = response.body.len(),
                    "search complete"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    event = %Event::SearchFailed,
                    mode = %plan.mode,
                    error = %e,
                    "search failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_index() {
        let executor = ElasticsearchExecutor::new(EngineClient::new("http://localhost:9200"), "products");
        assert_eq!(executor.index(), "products");
    }
}
