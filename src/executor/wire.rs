//! Wire encoding of search plans
//!
//! Lowers a `QueryPlan` into the engine's JSON query language. Empty bool
//! arrays are never emitted.

use serde_json::{json, Map, Value};

use crate::search::{Aggregation, BoolQuery, Predicate, QueryPlan};

fn object(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.into(), value);
    Value::Object(map)
}

/// Encodes a predicate as a query clause
pub fn encode_predicate(predicate: &Predicate) -> Value {
    match predicate {
        Predicate::MatchAll => json!({ "match_all": {} }),
        Predicate::Term { field, value } => {
            object("term", object(field.as_str(), json!({ "value": value })))
        }
        Predicate::Range(range) => {
            let mut bounds = Map::new();
            for (op, bound) in [
                ("gt", &range.gt),
                ("gte", &range.gte),
                ("lt", &range.lt),
                ("lte", &range.lte),
            ] {
                if let Some(v) = bound {
                    bounds.insert(op.to_string(), v.clone());
                }
            }
            object("range", object(range.field.as_str(), Value::Object(bounds)))
        }
        Predicate::MultiMatch(m) => json!({
            "multi_match": {
                "query": m.query,
                "fields": m.fields,
                "minimum_should_match": m.minimum_should_match,
                "fuzziness": m.fuzziness.as_str(),
            }
        }),
        Predicate::Bool(query) => object("bool", encode_bool(query)),
    }
}

fn encode_bool(query: &BoolQuery) -> Value {
    let mut map = Map::new();
    for (occur, clauses) in [
        ("must", &query.must),
        ("filter", &query.filter),
        ("should", &query.should),
    ] {
        if !clauses.is_empty() {
            let encoded = clauses.iter().map(encode_predicate).collect();
            map.insert(occur.to_string(), Value::Array(encoded));
        }
    }
    if let Some(n) = query.minimum_should_match {
        map.insert("minimum_should_match".to_string(), json!(n));
    }
    Value::Object(map)
}

/// Encodes one aggregation body (without its name)
pub fn encode_aggregation(agg: &Aggregation) -> Value {
    match agg {
        Aggregation::Min { field, .. } => json!({ "min": { "field": field } }),
        Aggregation::Max { field, .. } => json!({ "max": { "field": field } }),
        Aggregation::Terms { field, .. } => json!({ "terms": { "field": field } }),
        Aggregation::Filters { buckets, .. } => {
            let filters: Map<String, Value> = buckets
                .iter()
                .map(|(key, p)| (key.clone(), encode_predicate(p)))
                .collect();
            json!({ "filters": { "filters": filters } })
        }
        Aggregation::Filtered { filter, inner, .. } => json!({
            "filter": encode_predicate(filter),
            "aggs": encode_aggregations(std::slice::from_ref(&**inner)),
        }),
    }
}

/// Encodes a named aggregation list as an `aggs` object
pub fn encode_aggregations(aggs: &[Aggregation]) -> Value {
    let map: Map<String, Value> = aggs
        .iter()
        .map(|agg| (agg.name().to_string(), encode_aggregation(agg)))
        .collect();
    Value::Object(map)
}

/// Encodes the full `_search` request body
pub fn encode_search_body(plan: &QueryPlan) -> Value {
    let mut body = Map::new();
    body.insert("from".to_string(), json!(plan.from));
    body.insert("size".to_string(), json!(plan.size));
    body.insert("query".to_string(), encode_predicate(&plan.main_query));
    if let Some(post) = &plan.post_filter {
        body.insert("post_filter".to_string(), encode_predicate(post));
    }
    if !plan.aggregations.is_empty() {
        body.insert("aggs".to_string(), encode_aggregations(&plan.aggregations));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Filter, RangePredicate, SearchMode, SearchPlanner, SearchRequest};

    #[test]
    fn test_encode_term() {
        let p = Predicate::term("color.keyword", "red");
        assert_eq!(
            encode_predicate(&p),
            json!({ "term": { "color.keyword": { "value": "red" } } })
        );
    }

    #[test]
    fn test_encode_range_omits_missing_bounds() {
        let p = Predicate::range(RangePredicate::new("price").gte("10"));
        assert_eq!(encode_predicate(&p), json!({ "range": { "price": { "gte": "10" } } }));
    }

    #[test]
    fn test_encode_bool_skips_empty_occurrences() {
        let p = Predicate::any_of(vec![Predicate::term("brand.keyword", "Acme")]);
        assert_eq!(
            encode_predicate(&p),
            json!({
                "bool": {
                    "should": [{ "term": { "brand.keyword": { "value": "Acme" } } }],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_encode_multi_match() {
        let request = SearchRequest::new("shirt");
        let plan = SearchPlanner::default().plan(&request, SearchMode::ProductsOnly);
        let body = encode_search_body(&plan);

        assert_eq!(
            body["query"]["bool"]["must"][0]["bool"]["must"][0],
            json!({
                "multi_match": {
                    "query": "shirt",
                    "fields": ["name", "color", "brand", "material"],
                    "minimum_should_match": "66%",
                    "fuzziness": "AUTO"
                }
            })
        );
        assert_eq!(body["from"], 0);
        assert_eq!(body["size"], 16);
        assert!(body.get("aggs").is_none());
        assert!(body.get("post_filter").is_none());
    }

    #[test]
    fn test_encode_stock_buckets() {
        let agg = Aggregation::stock_buckets();
        assert_eq!(
            encode_aggregation(&agg),
            json!({
                "filters": {
                    "filters": {
                        "in_stock": { "range": { "stock": { "gt": 0 } } },
                        "not_in_stock": { "term": { "stock": { "value": 0 } } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_encode_filtered_aggregation() {
        let request = SearchRequest::new("")
            .with_filter(Filter::term("brand", "Acme"))
            .with_filter(Filter::term("color", "red"));
        let plan = SearchPlanner::default().plan(&request, SearchMode::ProductsWithFilteredAggs);
        let body = encode_search_body(&plan);

        let by_color = &body["aggs"]["by_color"];
        assert_eq!(by_color["aggs"]["by_color"], json!({ "terms": { "field": "color.keyword" } }));
        assert_eq!(
            by_color["filter"]["bool"]["filter"][0]["bool"]["should"][0],
            json!({ "term": { "brand.keyword": { "value": "Acme" } } })
        );
        assert_eq!(body["aggs"]["min_price"], json!({ "min": { "field": "price" } }));
        assert_eq!(body["aggs"]["max_price"], json!({ "max": { "field": "price" } }));
    }

    #[test]
    fn test_encode_post_filter() {
        let request = SearchRequest::new("").with_filter(Filter::term("color", "red"));
        let plan = SearchPlanner::default().plan(&request, SearchMode::ProductsWithAggs);
        let body = encode_search_body(&plan);

        assert_eq!(
            body["post_filter"],
            json!({
                "bool": {
                    "filter": [{
                        "bool": {
                            "should": [{ "term": { "color.keyword": { "value": "red" } } }],
                            "minimum_should_match": 1
                        }
                    }]
                }
            })
        );
    }
}
