//! Search request and filter model
//!
//! `RawSearchRequest` is the JSON accepted on the wire. It is lowered into a
//! typed `SearchRequest` before planning; unknown filter kinds are rejected
//! here, so no plan and no engine call ever sees them.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{SearchError, SearchResult};
use super::predicate::{Predicate, RangePredicate};

/// Fields whose filters are folded into the main query
pub const SCORING_FIELDS: [&str; 2] = ["price", "stock"];

/// Suffix addressing the keyword sub-field of a text field
pub const KEYWORD_SUFFIX: &str = ".keyword";

/// Term facets with a terms aggregation each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetField {
    Material,
    Brand,
    Color,
}

impl FacetField {
    pub const ALL: [FacetField; 3] = [FacetField::Material, FacetField::Brand, FacetField::Color];

    /// Document field name
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetField::Material => "material",
            FacetField::Brand => "brand",
            FacetField::Color => "color",
        }
    }

    /// Aggregation name
    pub fn agg_name(&self) -> &'static str {
        match self {
            FacetField::Material => "by_material",
            FacetField::Brand => "by_brand",
            FacetField::Color => "by_color",
        }
    }

    /// Keyword field the aggregation runs on
    pub fn keyword_field(&self) -> String {
        keyword_field(self.as_str())
    }
}

/// `<field>.keyword`
pub fn keyword_field(field: &str) -> String {
    format!("{}{}", field, KEYWORD_SUFFIX)
}

/// Returns true if filters on `field` belong in the main query
pub fn is_scoring_field(field: &str) -> bool {
    SCORING_FIELDS.contains(&field)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Accepts `"10"`, `10`, `10.5` or `true` and keeps the textual form.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = Option::<Scalar>::deserialize(deserializer)?;
    Ok(scalar.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

/// Filter as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawFilter {
    #[serde(default)]
    pub key: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub to: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl RawFilter {
    pub fn term(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            kind: "term".into(),
            ..Default::default()
        }
    }

    pub fn range(key: impl Into<String>, from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            key: key.into(),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            kind: "range".into(),
            ..Default::default()
        }
    }
}

/// A user-selected facet constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Exact match on the keyword sub-field
    Term { field: String, value: String },
    /// Inclusive bounds; both absent means no constraint
    Range {
        field: String,
        from: Option<String>,
        to: Option<String>,
    },
}

impl Filter {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, from: Option<&str>, to: Option<&str>) -> Self {
        Filter::Range {
            field: field.into(),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Filter::Term { field, .. } | Filter::Range { field, .. } => field,
        }
    }

    pub fn is_scoring(&self) -> bool {
        is_scoring_field(self.field())
    }

    /// Lowers this filter to a leaf predicate.
    pub fn to_predicate(&self) -> Predicate {
        match self {
            Filter::Term { field, value } => Predicate::term(keyword_field(field), value.as_str()),
            Filter::Range { field, from, to } => {
                let mut range = RangePredicate::new(field.as_str());
                if let Some(from) = from {
                    range = range.gte(from.as_str());
                }
                if let Some(to) = to {
                    range = range.lte(to.as_str());
                }
                Predicate::range(range)
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<RawFilter> for Filter {
    type Error = SearchError;

    fn try_from(raw: RawFilter) -> SearchResult<Self> {
        if raw.key.is_empty() {
            return Err(SearchError::invalid_filter("", "missing key"));
        }

        match raw.kind.as_str() {
            "term" => {
                let value = raw
                    .value
                    .ok_or_else(|| SearchError::invalid_filter(&raw.key, "term filter needs a value"))?;
                Ok(Filter::Term {
                    field: raw.key,
                    value,
                })
            }
            "range" => Ok(Filter::Range {
                field: raw.key,
                from: non_empty(raw.from),
                to: non_empty(raw.to),
            }),
            other => Err(SearchError::unsupported_filter_kind(other, raw.key)),
        }
    }
}

/// Search request as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub from: u64,
    #[serde(default)]
    pub filters: Vec<RawFilter>,
}

impl RawSearchRequest {
    /// Parse from a JSON string
    pub fn parse(json: &str) -> SearchResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SearchError::invalid_request(format!("Invalid JSON: {}", e)))
    }
}

/// Typed search request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    /// Free text, may be empty
    pub text: String,
    /// Pagination offset
    pub offset: u64,
    /// Selected filters in caller order
    pub filters: Vec<Filter>,
}

impl SearchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Filters folded into the main query
    pub fn scoring_filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|f| f.is_scoring())
    }

    /// Filters applied as post-filter or per-aggregation filter
    pub fn facet_filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|f| !f.is_scoring())
    }
}

impl TryFrom<RawSearchRequest> for SearchRequest {
    type Error = SearchError;

    fn try_from(raw: RawSearchRequest) -> SearchResult<Self> {
        let filters = raw
            .filters
            .into_iter()
            .map(Filter::try_from)
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(Self {
            text: raw.query,
            offset: raw.from,
            filters,
        })
    }
}
