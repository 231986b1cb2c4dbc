//! Catalog document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product as stored in the search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub color: String,
    pub material: String,
    pub id: String,
    pub product_image_url: String,
    pub brand: String,
    pub brand_logo_url: String,
    pub last_updated: DateTime<Utc>,
    pub stock: u32,
    pub commission: u32,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Product {
        Product {
            name: "Rustic Wooden Chair".into(),
            price: 129.99,
            color: "olive".into(),
            material: "Wooden".into(),
            id: "01234567890123456789".into(),
            product_image_url: "https://picsum.photos/id/10/200/200?blur=1".into(),
            brand: "Weber GmbH".into(),
            brand_logo_url: "https://pigment.github.io/fake-logos/logos/medium/color/3.png".into(),
            last_updated: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            stock: 0,
            commission: 7,
        }
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["productImageUrl"], "https://picsum.photos/id/10/200/200?blur=1");
        assert_eq!(json["brandLogoUrl"], "https://pigment.github.io/fake-logos/logos/medium/color/3.png");
        assert_eq!(json["lastUpdated"], "2026-03-01T12:00:00Z");
        assert!(json.get("product_image_url").is_none());
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample();
        assert!(!product.in_stock());
        product.stock = 3;
        assert!(product.in_stock());
    }
}
