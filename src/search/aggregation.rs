//! Aggregation tree
//!
//! Facet aggregations requested alongside hits. Mode C wraps a terms
//! aggregation in a filter aggregation carrying the same name.

use super::predicate::{Predicate, RangePredicate};
use super::request::FacetField;

pub const MIN_PRICE: &str = "min_price";
pub const MAX_PRICE: &str = "max_price";
pub const BY_STOCK: &str = "by_stock";
pub const IN_STOCK: &str = "in_stock";
pub const NOT_IN_STOCK: &str = "not_in_stock";

/// A single aggregation request
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Min {
        name: String,
        field: String,
    },
    Max {
        name: String,
        field: String,
    },
    Terms {
        name: String,
        field: String,
    },
    /// Named buckets, one per predicate, in the given order
    Filters {
        name: String,
        buckets: Vec<(String, Predicate)>,
    },
    /// `inner` computed over documents matching `filter` only
    Filtered {
        name: String,
        filter: Predicate,
        inner: Box<Aggregation>,
    },
}

impl Aggregation {
    pub fn name(&self) -> &str {
        match self {
            Aggregation::Min { name, .. }
            | Aggregation::Max { name, .. }
            | Aggregation::Terms { name, .. }
            | Aggregation::Filters { name, .. }
            | Aggregation::Filtered { name, .. } => name,
        }
    }

    /// Unwrapped terms aggregation for a facet
    pub fn facet_terms(facet: FacetField) -> Self {
        Aggregation::Terms {
            name: facet.agg_name().to_string(),
            field: facet.keyword_field(),
        }
    }

    pub fn min_price() -> Self {
        Aggregation::Min {
            name: MIN_PRICE.to_string(),
            field: "price".to_string(),
        }
    }

    pub fn max_price() -> Self {
        Aggregation::Max {
            name: MAX_PRICE.to_string(),
            field: "price".to_string(),
        }
    }

    /// Two buckets: `stock > 0` and `stock == 0`
    pub fn stock_buckets() -> Self {
        Aggregation::Filters {
            name: BY_STOCK.to_string(),
            buckets: vec![
                (
                    IN_STOCK.to_string(),
                    Predicate::range(RangePredicate::new("stock").gt(0)),
                ),
                (NOT_IN_STOCK.to_string(), Predicate::term("stock", 0)),
            ],
        }
    }

    /// Returns the wrapper filter if this is a filtered aggregation
    pub fn wrapper_filter(&self) -> Option<&Predicate> {
        match self {
            Aggregation::Filtered { filter, .. } => Some(filter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_terms_field() {
        let agg = Aggregation::facet_terms(FacetField::Brand);
        assert_eq!(
            agg,
            Aggregation::Terms {
                name: "by_brand".into(),
                field: "brand.keyword".into(),
            }
        );
        assert!(agg.wrapper_filter().is_none());
    }

    #[test]
    fn test_stock_buckets() {
        let agg = Aggregation::stock_buckets();
        assert_eq!(agg.name(), "by_stock");
        match agg {
            Aggregation::Filters { buckets, .. } => {
                let keys: Vec<_> = buckets.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["in_stock", "not_in_stock"]);
            }
            other => panic!("expected filters, got {:?}", other),
        }
    }
}
