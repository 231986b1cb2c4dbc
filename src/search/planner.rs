//! Faceted query planner
//!
//! Produces deterministic plans from a typed request and a consistency mode.
//!
//! Filter routing:
//! 1. Filters on `price` and `stock` are folded into the main query, so they
//!    scope hits and every aggregation.
//! 2. All other filters are grouped by field. Values of one field are OR'd,
//!    groups are AND'd. The result narrows hits only (post-filter), or in
//!    Mode C also scopes the aggregations of the *other* facets.
//!
//! Groups are emitted in field-name order; within a field, caller order is
//! preserved.

use std::collections::BTreeMap;
use std::fmt;

use super::aggregation::Aggregation;
use super::errors::SearchResult;
use super::fulltext::full_text_query;
use super::predicate::{BoolQuery, Predicate};
use super::request::{FacetField, Filter, RawSearchRequest, SearchRequest};

/// Hits per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 16;

/// Facet consistency model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Hits only
    ProductsOnly,
    /// Flat aggregations, facet selections applied as post-filter
    ProductsWithAggs,
    /// Each facet aggregation filtered by the selections on the other facets
    ProductsWithFilteredAggs,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::ProductsOnly,
        SearchMode::ProductsWithAggs,
        SearchMode::ProductsWithFilteredAggs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::ProductsOnly => "products_only",
            SearchMode::ProductsWithAggs => "products_with_aggs",
            SearchMode::ProductsWithFilteredAggs => "products_with_filtered_aggs",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }

    pub fn has_aggregations(&self) -> bool {
        !matches!(self, SearchMode::ProductsOnly)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable search plan
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub mode: SearchMode,
    /// Full text AND scoring filters (AND facet groups in Mode A)
    pub main_query: Predicate,
    /// Facet groups narrowing hits after aggregation; absent when nothing is selected
    pub post_filter: Option<Predicate>,
    pub aggregations: Vec<Aggregation>,
    pub from: u64,
    pub size: u32,
}

impl QueryPlan {
    /// Looks up an aggregation by name
    pub fn aggregation(&self, name: &str) -> Option<&Aggregation> {
        self.aggregations.iter().find(|agg| agg.name() == name)
    }

    /// Every clause a hit must satisfy, flattened across the main query and
    /// the post-filter.
    pub fn hit_clauses(&self) -> Vec<&Predicate> {
        let mut clauses = Vec::new();
        match self.main_query.as_bool() {
            Some(main) => clauses.extend(main.must.iter().chain(&main.filter)),
            None => clauses.push(&self.main_query),
        }
        if let Some(post) = self.post_filter.as_ref().and_then(Predicate::as_bool) {
            clauses.extend(post.filter.iter());
        }
        clauses
    }
}

/// Stateless planner. Safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlanner {
    page_size: u32,
}

impl SearchPlanner {
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Validates a wire request, then plans it.
    pub fn plan_raw(&self, raw: RawSearchRequest, mode: SearchMode) -> SearchResult<QueryPlan> {
        let request = SearchRequest::try_from(raw)?;
        Ok(self.plan(&request, mode))
    }

    /// Plans a typed request.
    ///
    /// This method is deterministic: same inputs → same plan.
    pub fn plan(&self, request: &SearchRequest, mode: SearchMode) -> QueryPlan {
        let main = scored_query(request);

        let (main_query, post_filter, aggregations) = match mode {
            SearchMode::ProductsOnly => {
                // No aggregations to protect, so facet groups can filter hits directly
                let main = facet_groups(request.facet_filters())
                    .into_iter()
                    .fold(main, BoolQuery::filter);
                (Predicate::Bool(main), None, Vec::new())
            }
            SearchMode::ProductsWithAggs => {
                let mut aggs = price_aggregations();
                aggs.extend(FacetField::ALL.into_iter().map(Aggregation::facet_terms));
                aggs.push(Aggregation::stock_buckets());
                (Predicate::Bool(main), post_filter(request), aggs)
            }
            SearchMode::ProductsWithFilteredAggs => {
                // Price and stock aggregations are not cross-filtered
                let mut aggs = price_aggregations();
                aggs.extend(
                    FacetField::ALL
                        .into_iter()
                        .map(|facet| filtered_facet_aggregation(request, facet)),
                );
                aggs.push(Aggregation::stock_buckets());
                (Predicate::Bool(main), post_filter(request), aggs)
            }
        };

        QueryPlan {
            mode,
            main_query,
            post_filter,
            aggregations,
            from: request.offset,
            size: self.page_size,
        }
    }
}

impl Default for SearchPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Full text AND every scoring filter
fn scored_query(request: &SearchRequest) -> BoolQuery {
    request
        .scoring_filters()
        .map(Filter::to_predicate)
        .fold(
            BoolQuery::new().must(full_text_query(&request.text)),
            BoolQuery::must,
        )
}

/// One OR group per field, ordered by field name
fn facet_groups<'a>(filters: impl Iterator<Item = &'a Filter>) -> Vec<Predicate> {
    let mut by_field: BTreeMap<&str, Vec<Predicate>> = BTreeMap::new();
    for filter in filters {
        by_field
            .entry(filter.field())
            .or_default()
            .push(filter.to_predicate());
    }

    by_field.into_values().map(Predicate::any_of).collect()
}

/// AND of all facet groups, or `None` if no facet filter is selected
fn post_filter(request: &SearchRequest) -> Option<Predicate> {
    let groups = facet_groups(request.facet_filters());
    if groups.is_empty() {
        None
    } else {
        Some(Predicate::all_of(groups))
    }
}

/// Terms aggregation for `facet`, scoped by the selections on every other
/// facet field. A facet never filters on its own selection.
fn filtered_facet_aggregation(request: &SearchRequest, facet: FacetField) -> Aggregation {
    let groups = facet_groups(
        request
            .facet_filters()
            .filter(|filter| filter.field() != facet.as_str()),
    );

    let terms = Aggregation::facet_terms(facet);
    if groups.is_empty() {
        return terms;
    }

    Aggregation::Filtered {
        name: facet.agg_name().to_string(),
        filter: Predicate::all_of(groups),
        inner: Box::new(terms),
    }
}

fn price_aggregations() -> Vec<Aggregation> {
    vec![Aggregation::min_price(), Aggregation::max_price()]
}
