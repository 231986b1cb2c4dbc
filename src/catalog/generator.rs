//! Synthetic product generator
//!
//! Produces plausible catalog data: a small pool of brands shared by all
//! products, commerce-style names, prices in 1.00–1000.00 and picsum images.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

use super::product::Product;

/// Number of distinct brands per generated catalog
pub const BRANDS_MAX: usize = 10;

/// picsum ids in 1..1000 that return 404
pub const NON_EXISTING_IMAGE_IDS: [u32; 87] = [
    86, 97, 105, 138, 148, 150, 205, 207, 224, 226, 245, 246, 262, 285, 286, 298, 303, 332, 333,
    346, 359, 394, 414, 422, 438, 462, 463, 470, 489, 540, 561, 578, 587, 589, 592, 595, 597, 601,
    624, 632, 636, 644, 647, 673, 697, 706, 707, 708, 709, 710, 711, 712, 713, 714, 720, 725, 734,
    745, 746, 747, 748, 749, 750, 751, 752, 753, 754, 759, 761, 762, 763, 771, 792, 801, 812, 843,
    850, 854, 895, 897, 899, 917, 920, 934, 956, 963, 968,
];

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Enormous", "Mediocre", "Synergistic", "Heavy Duty",
    "Lightweight", "Aerodynamic", "Durable",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Leather", "Silk",
    "Wool", "Linen", "Marble", "Iron", "Bronze", "Copper", "Aluminum", "Paper",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Gloves", "Pants", "Shirt", "Table", "Shoes", "Hat", "Plate",
    "Knife", "Bottle", "Coat", "Lamp", "Keyboard", "Bag", "Bench", "Clock", "Watch", "Wallet",
];

const COLORS: &[&str] = &[
    "red", "blue", "green", "yellow", "purple", "orange", "black", "white", "grey", "pink",
    "brown", "olive", "teal", "navy", "maroon", "silver", "gold", "cyan", "magenta", "lime",
];

const LOGO_COUNT: u32 = 13;
const MAX_AGE_SECONDS: i64 = 365 * 24 * 60 * 60;

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Generates random products against a fixed brand pool
pub struct ProductGenerator<R: Rng> {
    rng: R,
    brands: Vec<String>,
    now: DateTime<Utc>,
}

impl<R: Rng> ProductGenerator<R> {
    /// Creates a generator and draws its brand pool. `now` anchors `lastUpdated`.
    pub fn new(mut rng: R, now: DateTime<Utc>) -> Self {
        let mut brands = BTreeSet::new();
        while brands.len() < BRANDS_MAX {
            brands.insert(CompanyName().fake_with_rng::<String, _>(&mut rng));
        }

        Self {
            rng,
            brands: brands.into_iter().collect(),
            now,
        }
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    fn product_name(&mut self) -> String {
        format!(
            "{} {} {}",
            pick(&mut self.rng, ADJECTIVES),
            pick(&mut self.rng, MATERIALS),
            pick(&mut self.rng, PRODUCTS)
        )
    }

    fn image_id(&mut self) -> u32 {
        loop {
            let id = self.rng.gen_range(1..1000);
            if !NON_EXISTING_IMAGE_IDS.contains(&id) {
                return id;
            }
        }
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    /// Generates the next product
    pub fn next_product(&mut self) -> Product {
        let name = self.product_name();
        let cents: u32 = self.rng.gen_range(100..=100_000);
        let material = pick(&mut self.rng, MATERIALS).to_string();
        let color = pick(&mut self.rng, COLORS).to_string();
        let id = self.digits(20);
        let brand = self
            .brands
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        let image_id = self.image_id();
        let logo_id = self.rng.gen_range(1..=LOGO_COUNT);
        let age = Duration::seconds(self.rng.gen_range(0..MAX_AGE_SECONDS));

        Product {
            name,
            price: f64::from(cents) / 100.0,
            color,
            material,
            id,
            product_image_url: format!("https://picsum.photos/id/{}/200/200?blur=1", image_id),
            brand,
            brand_logo_url: format!(
                "https://pigment.github.io/fake-logos/logos/medium/color/{}.png",
                logo_id
            ),
            last_updated: self.now - age,
            stock: self.rng.gen_range(0..10),
            commission: self.rng.gen_range(5..20),
        }
    }
}

impl<R: Rng> Iterator for ProductGenerator<R> {
    type Item = Product;

    fn next(&mut self) -> Option<Product> {
        Some(self.next_product())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator(seed: u64) -> ProductGenerator<StdRng> {
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        ProductGenerator::new(StdRng::seed_from_u64(seed), now)
    }

    #[test]
    fn test_brand_pool_is_distinct() {
        let gen = generator(7);
        let distinct: BTreeSet<_> = gen.brands().iter().collect();
        assert_eq!(gen.brands().len(), BRANDS_MAX);
        assert_eq!(distinct.len(), BRANDS_MAX);
    }

    #[test]
    fn test_brand_pool_follows_seed() {
        let a = generator(11);
        let b = generator(11);
        assert_eq!(a.brands(), b.brands());
        assert!(a.brands().iter().all(|brand| !brand.trim().is_empty()));
    }

    #[test]
    fn test_products_within_bounds() {
        let mut gen = generator(42);
        let brands = gen.brands().to_vec();
        let now = gen.now;

        for product in gen.by_ref().take(500) {
            assert!(product.price >= 1.0 && product.price <= 1000.0);
            assert!(product.stock < 10);
            assert!((5..20).contains(&product.commission));
            assert_eq!(product.id.len(), 20);
            assert!(product.id.chars().all(|c| c.is_ascii_digit()));
            assert!(brands.contains(&product.brand));
            assert!(MATERIALS.contains(&product.material.as_str()));
            assert!(COLORS.contains(&product.color.as_str()));
            assert!(product.last_updated <= now);
            assert!(product.last_updated > now - Duration::days(366));
        }
    }

    #[test]
    fn test_missing_images_avoided() {
        let mut gen = generator(3);
        for _ in 0..500 {
            let id = gen.image_id();
            assert!((1..1000).contains(&id));
            assert!(!NON_EXISTING_IMAGE_IDS.contains(&id));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a: Vec<_> = generator(9).take(20).collect();
        let b: Vec<_> = generator(9).take(20).collect();
        assert_eq!(a, b);
    }
}
