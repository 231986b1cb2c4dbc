//! Explain output for search plans
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use super::aggregation::Aggregation;
use super::errors::SearchError;
use super::planner::QueryPlan;
use super::predicate::Predicate;

/// Explain plan output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Mode name (if accepted)
    pub mode: Option<String>,
    /// Hit constraints, one line each
    pub hit_clauses: Vec<String>,
    /// Post-filter description
    pub post_filter: Option<String>,
    /// Aggregations, one line each
    pub aggregations: Vec<String>,
    pub from: Option<u64>,
    pub size: Option<u32>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful query plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        Self {
            accepted: true,
            mode: Some(plan.mode.as_str().to_string()),
            hit_clauses: plan.hit_clauses().into_iter().map(describe).collect(),
            post_filter: plan.post_filter.as_ref().map(describe),
            aggregations: plan.aggregations.iter().map(describe_aggregation).collect(),
            from: Some(plan.from),
            size: Some(plan.size),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a rejected request
    pub fn from_error(err: &SearchError) -> Self {
        Self {
            accepted: false,
            mode: None,
            hit_clauses: Vec::new(),
            post_filter: None,
            aggregations: Vec::new(),
            from: None,
            size: None,
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

/// Compact one-line rendering of a predicate
pub fn describe(predicate: &Predicate) -> String {
    match predicate {
        Predicate::MatchAll => "match_all".to_string(),
        Predicate::Term { field, value } => format!("{} = {}", field, value),
        Predicate::Range(range) => {
            let bounds: Vec<String> = [
                ("gt", &range.gt),
                ("gte", &range.gte),
                ("lt", &range.lt),
                ("lte", &range.lte),
            ]
            .into_iter()
            .filter_map(|(op, v)| v.as_ref().map(|v| format!("{} {}", op, v)))
            .collect();
            format!("{} {}", range.field, bounds.join(" "))
        }
        Predicate::MultiMatch(m) => format!(
            "match({:?} in [{}], msm={}, fuzziness={})",
            m.query,
            m.fields.join(", "),
            m.minimum_should_match,
            m.fuzziness.as_str()
        ),
        Predicate::Bool(query) => {
            let mut parts = Vec::new();
            if !query.must.is_empty() {
                parts.push(join("AND", &query.must));
            }
            if !query.filter.is_empty() {
                parts.push(join("AND", &query.filter));
            }
            if !query.should.is_empty() {
                parts.push(join("OR", &query.should));
            }
            match parts.len() {
                0 => "match_all".to_string(),
                1 => parts.remove(0),
                _ => format!("({})", parts.join(" AND ")),
            }
        }
    }
}

fn join(op: &str, predicates: &[Predicate]) -> String {
    let rendered: Vec<String> = predicates.iter().map(describe).collect();
    if rendered.len() == 1 {
        rendered.into_iter().collect()
    } else {
        format!("({})", rendered.join(&format!(" {} ", op)))
    }
}

fn describe_aggregation(agg: &Aggregation) -> String {
    match agg {
        Aggregation::Min { name, field } => format!("{}: min({})", name, field),
        Aggregation::Max { name, field } => format!("{}: max({})", name, field),
        Aggregation::Terms { name, field } => format!("{}: terms({})", name, field),
        Aggregation::Filters { name, buckets } => {
            let buckets: Vec<String> = buckets
                .iter()
                .map(|(key, p)| format!("{}: {}", key, describe(p)))
                .collect();
            format!("{}: filters[{}]", name, buckets.join("; "))
        }
        Aggregation::Filtered {
            name,
            filter,
            inner,
        } => format!(
            "{}: filter({}) -> {}",
            name,
            describe(filter),
            describe_aggregation(inner)
        ),
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(mode) = &self.mode {
                writeln!(f, "Mode: {}", mode)?;
            }
            if !self.hit_clauses.is_empty() {
                writeln!(f, "Hits must match:")?;
                for clause in &self.hit_clauses {
                    writeln!(f, "  - {}", clause)?;
                }
            }
            match &self.post_filter {
                Some(post) => writeln!(f, "Post Filter: {}", post)?,
                None => writeln!(f, "Post Filter: none")?,
            }
            if !self.aggregations.is_empty() {
                writeln!(f, "Aggregations:")?;
                for agg in &self.aggregations {
                    writeln!(f, "  - {}", agg)?;
                }
            }
            if let (Some(from), Some(size)) = (self.from, self.size) {
                writeln!(f, "Page: from {} size {}", from, size)?;
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}
