//! Engine-level predicate tree
//!
//! Plans are built from immutable predicate values. Compound predicates are
//! assembled by consuming builders, so no builder instance is ever shared
//! between two branches of a plan.

use serde_json::Value;

/// Fuzziness setting for full-text matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Edit distance derived from term length by the engine
    Auto,
}

impl Fuzziness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fuzziness::Auto => "AUTO",
        }
    }
}

/// Multi-field full-text match
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMatch {
    pub query: String,
    pub fields: Vec<String>,
    pub minimum_should_match: String,
    pub fuzziness: Fuzziness,
}

/// Range bounds on a single field. Absent bounds are not emitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangePredicate {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

impl RangePredicate {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// True if no bound is set
    pub fn is_unbounded(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }
}

/// Boolean combination of predicates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    /// Scored, all must match
    pub must: Vec<Predicate>,
    /// Unscored, all must match
    pub filter: Vec<Predicate>,
    /// At least `minimum_should_match` must match
    pub should: Vec<Predicate>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, predicate: Predicate) -> Self {
        self.must.push(predicate);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter.push(predicate);
        self
    }

    pub fn should(mut self, predicate: Predicate) -> Self {
        self.should.push(predicate);
        self
    }

    pub fn minimum_should_match(mut self, n: u32) -> Self {
        self.minimum_should_match = Some(n);
        self
    }

    /// True if the bool has no clauses at all
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.filter.is_empty() && self.should.is_empty()
    }
}

/// A query-engine predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every document
    MatchAll,
    /// Exact value on a keyword or numeric field
    Term { field: String, value: Value },
    Range(RangePredicate),
    MultiMatch(MultiMatch),
    Bool(BoolQuery),
}

impl Predicate {
    /// Create an exact-match predicate
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Wrap a range. An unbounded range collapses to `MatchAll`.
    pub fn range(range: RangePredicate) -> Self {
        if range.is_unbounded() {
            Predicate::MatchAll
        } else {
            Predicate::Range(range)
        }
    }

    /// Disjunction: at least one of `predicates` must match
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let query = predicates
            .into_iter()
            .fold(BoolQuery::new(), BoolQuery::should)
            .minimum_should_match(1);
        Predicate::Bool(query)
    }

    /// Conjunction in filter context
    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Bool(predicates.into_iter().fold(BoolQuery::new(), BoolQuery::filter))
    }

    /// Returns the bool query if this is a compound predicate
    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Predicate::Bool(query) => Some(query),
            _ => None,
        }
    }

    /// Collects every field addressed anywhere in this predicate, in visit order.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::MatchAll => {}
            Predicate::Term { field, .. } => out.push(field),
            Predicate::Range(range) => out.push(&range.field),
            Predicate::MultiMatch(multi) => out.extend(multi.fields.iter().map(String::as_str)),
            Predicate::Bool(query) => {
                for p in query.must.iter().chain(&query.filter).chain(&query.should) {
                    p.collect_fields(out);
                }
            }
        }
    }
}
