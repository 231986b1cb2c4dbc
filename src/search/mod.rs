//! Faceted search core
//!
//! Turns free text plus a set of selected facet filters into a search plan:
//! a main query, an optional post-filter and an aggregation tree.
//!
//! # Design Principles
//!
//! - Pure: planning performs no I/O and holds no shared state
//! - Deterministic: same inputs → same plan
//! - Closed filter model: `term` and `range` only, anything else is rejected
//!   before a plan is built
//!
//! # Consistency Modes
//!
//! 1. `products_only` - hits, no aggregations
//! 2. `products_with_aggs` - flat aggregations, facet selections as post-filter
//! 3. `products_with_filtered_aggs` - each facet aggregation scoped by the
//!    selections on the other facets

mod aggregation;
mod errors;
mod explain;
mod fulltext;
mod planner;
mod predicate;
mod request;

pub use aggregation::{Aggregation, BY_STOCK, IN_STOCK, MAX_PRICE, MIN_PRICE, NOT_IN_STOCK};
pub use errors::{SearchError, SearchErrorCode, SearchResult};
pub use explain::{describe, ExplainPlan};
pub use fulltext::{full_text_query, FULL_TEXT_FIELDS, MINIMUM_SHOULD_MATCH};
pub use planner::{QueryPlan, SearchMode, SearchPlanner, DEFAULT_PAGE_SIZE};
pub use predicate::{BoolQuery, Fuzziness, MultiMatch, Predicate, RangePredicate};
pub use request::{
    is_scoring_field, keyword_field, FacetField, Filter, RawFilter, RawSearchRequest,
    SearchRequest, SCORING_FIELDS,
};
