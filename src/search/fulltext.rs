//! Full-text clause
//!
//! A fuzzy multi-field match over the product's descriptive fields.

use super::predicate::{BoolQuery, Fuzziness, MultiMatch, Predicate};

/// Fields searched by free text
pub const FULL_TEXT_FIELDS: [&str; 4] = ["name", "color", "brand", "material"];

/// Share of query terms that must match
pub const MINIMUM_SHOULD_MATCH: &str = "66%";

/// Builds the full-text clause for `text`.
///
/// Blank text matches every document.
pub fn full_text_query(text: &str) -> Predicate {
    let text = text.trim();
    let clause = if text.is_empty() {
        Predicate::MatchAll
    } else {
        Predicate::MultiMatch(MultiMatch {
            query: text.to_string(),
            fields: FULL_TEXT_FIELDS.iter().map(|f| f.to_string()).collect(),
            minimum_should_match: MINIMUM_SHOULD_MATCH.to_string(),
            fuzziness: Fuzziness::Auto,
        })
    };

    Predicate::Bool(BoolQuery::new().must(clause))
}
