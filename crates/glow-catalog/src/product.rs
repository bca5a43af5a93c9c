//! Product types for the cosmetics catalog.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Skin types a user can declare and a product can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Dry,
    Oily,
    Combination,
    Sensitive,
    Normal,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Dry => "dry",
            SkinType::Oily => "oily",
            SkinType::Combination => "combination",
            SkinType::Sensitive => "sensitive",
            SkinType::Normal => "normal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dry" => Some(SkinType::Dry),
            "oily" => Some(SkinType::Oily),
            "combination" => Some(SkinType::Combination),
            "sensitive" => Some(SkinType::Sensitive),
            "normal" => Some(SkinType::Normal),
            _ => None,
        }
    }
}

/// Aggregate review rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating, 0.0 to 5.0.
    pub average: f64,
    /// Number of reviews behind the average.
    pub count: i64,
}

impl Rating {
    pub fn new(average: f64, count: i64) -> Self {
        Self { average, count }
    }

    /// Whether any reviews exist.
    pub fn is_rated(&self) -> bool {
        self.count > 0
    }

    /// Review-volume-weighted rating: `average * ln(1 + count)`.
    ///
    /// A single five-star review must not outweigh hundreds of
    /// four-star reviews.
    pub fn weighted(&self) -> f64 {
        self.average * (1.0 + self.count as f64).ln()
    }
}

/// A product in the cosmetics catalog.
///
/// Read-only to the query and recommendation engines; ownership of the
/// record lives with the catalog store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// Short description for listings.
    pub short_description: Option<String>,
    /// Brand name.
    pub brand: String,
    /// Category this product belongs to.
    pub category: CategoryId,
    /// Optional sub-category.
    pub sub_category: Option<CategoryId>,
    /// Selling price in minor currency units.
    pub price: Money,
    /// Compare-at price (original price for showing discounts).
    ///
    /// Stored in the same currency unit as `price`. Records where this is
    /// not greater than `price` are tolerated.
    pub compare_at_price: Option<Money>,
    /// Units on hand (non-negative).
    pub inventory: i64,
    /// New-arrival flag.
    pub is_new: bool,
    /// Bestseller flag.
    pub is_bestseller: bool,
    /// Featured flag.
    pub featured: bool,
    /// Aggregate review rating.
    pub rating: Rating,
    /// Number of wishlists containing this product.
    pub wishlist_count: i64,
    /// Ingredient and attribute tokens (e.g., "niacinamide", "vegan").
    pub tags: Vec<String>,
    /// Unix timestamp of record creation.
    pub created_at: i64,
    /// Unix timestamp the product went live.
    pub published_at: i64,
}

impl Product {
    /// Create a new product with empty optional fields.
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<CategoryId>,
        price: Money,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: None,
            short_description: None,
            brand: brand.into(),
            category: category.into(),
            sub_category: None,
            price,
            compare_at_price: None,
            inventory: 0,
            is_new: false,
            is_bestseller: false,
            featured: false,
            rating: Rating::default(),
            wishlist_count: 0,
            tags: Vec::new(),
            created_at: now,
            published_at: now,
        }
    }

    /// Check if the product has units on hand.
    pub fn is_in_stock(&self) -> bool {
        self.inventory > 0
    }

    /// Check if this product is on sale (compare-at price above price).
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .map(|cap| cap.amount_minor > self.price.amount_minor)
            .unwrap_or(false)
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.compare_at_price.and_then(|cap| {
            if cap.amount_minor > self.price.amount_minor {
                let savings = cap.amount_minor - self.price.amount_minor;
                Some((savings as f64 / cap.amount_minor as f64) * 100.0)
            } else {
                None
            }
        })
    }

    /// Add a tag to this product.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Check whether the product carries a tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Age in whole days since the product went live.
    pub fn age_days(&self, now: i64) -> i64 {
        ((now - self.published_at) / 86_400).max(0)
    }
}

/// Get current Unix timestamp.
pub fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
