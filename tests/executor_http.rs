//! Executor HTTP Tests
//!
//! Tests for the engine boundary against a mock HTTP server:
//! - Exactly one `_search` call per plan, body in the engine's query language
//! - Engine response body passed through untouched
//! - Non-2xx and transport failures surface as `ExecutionError`

use mockito::{Matcher, Server};
use serde_json::json;
use shopsearch::executor::{ElasticsearchExecutor, EngineClient, ExecutionError, QueryExecutor};
use shopsearch::search::{Filter, SearchMode, SearchPlanner, SearchRequest};

// =============================================================================
// Helper Functions
// =============================================================================

fn executor(base_url: &str) -> ElasticsearchExecutor {
    ElasticsearchExecutor::new(EngineClient::new(base_url), "products")
}

fn shirt_plan(mode: SearchMode) -> shopsearch::search::QueryPlan {
    let request = SearchRequest::new("shirt")
        .with_filter(Filter::term("color", "red"))
        .with_filter(Filter::range("price", Some("10"), Some("50")));
    SearchPlanner::default().plan(&request, mode)
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_posts_encoded_plan() {
    let mut server = Server::new_async().await;
    let engine_body = r#"{"took":3,"hits":{"total":{"value":1},"hits":[{"_id":"1"}]},"aggregations":{}}"#;

    let mock = server
        .mock("POST", "/products/_search")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "from": 0,
            "size": 16,
            "post_filter": { "bool": { "filter": [ { "bool": {
                "should": [ { "term": { "color.keyword": { "value": "red" } } } ],
                "minimum_should_match": 1
            } } ] } },
            "aggs": { "by_color": { "terms": { "field": "color.keyword" } } }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(engine_body)
        .expect(1)
        .create_async()
        .await;

    let response = executor(&server.url())
        .execute(&shirt_plan(SearchMode::ProductsWithFilteredAggs))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, engine_body);
}

#[tokio::test]
async fn test_products_only_sends_no_aggs() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/products/_search")
        .match_body(Matcher::PartialJson(json!({ "from": 0, "size": 16 })))
        .with_status(200)
        .with_body(r#"{"hits":{"hits":[]}}"#)
        .create_async()
        .await;

    let plan = shirt_plan(SearchMode::ProductsOnly);
    let body = shopsearch::executor::encode_search_body(&plan);
    assert!(body.get("aggs").is_none());
    assert!(body.get("post_filter").is_none());

    executor(&server.url()).execute(&plan).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_engine_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/products/_search")
        .with_status(400)
        .with_body(r#"{"error":{"type":"parsing_exception"}}"#)
        .create_async()
        .await;

    let err = executor(&server.url())
        .execute(&shirt_plan(SearchMode::ProductsWithAggs))
        .await
        .unwrap_err();

    assert_eq!(err.engine_status(), Some(400));
    assert_eq!(err.status_code(), 502);
    match err {
        ExecutionError::EngineStatus { body, .. } => assert!(body.contains("parsing_exception")),
        other => panic!("expected EngineStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_index_is_engine_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/products/_search")
        .with_status(404)
        .with_body(r#"{"error":{"type":"index_not_found_exception"}}"#)
        .create_async()
        .await;

    let err = executor(&server.url())
        .execute(&shirt_plan(SearchMode::ProductsOnly))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SHOP_ENGINE_REJECTED");
}

#[tokio::test]
async fn test_unreachable_engine_is_transport_error() {
    // Nothing listens on port 9 locally
    let err = executor("http://127.0.0.1:9")
        .execute(&shirt_plan(SearchMode::ProductsOnly))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Transport(_)));
    assert_eq!(err.code(), "SHOP_ENGINE_UNREACHABLE");
    assert_eq!(err.engine_status(), None);
}

// =============================================================================
// Index Management Tests
// =============================================================================

#[tokio::test]
async fn test_index_exists() {
    let mut server = Server::new_async().await;
    let _present = server.mock("HEAD", "/products").with_status(200).create_async().await;
    let _absent = server.mock("HEAD", "/missing").with_status(404).create_async().await;

    let client = EngineClient::new(server.url());
    assert!(client.index_exists("products").await.unwrap());
    assert!(!client.index_exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_bulk_sends_ndjson_with_refresh() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/products/_bulk")
        .match_query(Matcher::UrlEncoded("refresh".into(), "true".into()))
        .match_header("content-type", "application/x-ndjson")
        .match_body("{\"index\":{\"_id\":\"1\"}}\n{\"name\":\"Lamp\"}\n")
        .with_status(200)
        .with_body(r#"{"errors":false,"items":[{"index":{"status":201}}]}"#)
        .create_async()
        .await;

    let client = EngineClient::new(server.url());
    let response = client
        .bulk(
            "products",
            "{\"index\":{\"_id\":\"1\"}}\n{\"name\":\"Lamp\"}\n".to_string(),
            true,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response["errors"], false);
}
