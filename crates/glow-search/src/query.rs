//! Canonical search query types.

use glow_catalog::{CategoryId, SkinType};
use serde::{Deserialize, Serialize};

/// Sort modes for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// Sort by relevance (default).
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by newest first.
    Newest,
    /// Sort by highest rated.
    Rating,
    /// Sort by bestseller flag, then wishlist count.
    Bestseller,
}

impl SortMode {
    /// Parse a sort parameter; unknown strings fall back to relevance.
    pub fn from_str(s: &str) -> Self {
        match s {
            "price_asc" => SortMode::PriceAsc,
            "price_desc" => SortMode::PriceDesc,
            "newest" => SortMode::Newest,
            "rating" => SortMode::Rating,
            "bestseller" => SortMode::Bestseller,
            _ => SortMode::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::Newest => "newest",
            SortMode::Rating => "rating",
            SortMode::Bestseller => "bestseller",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
            SortMode::Newest => "Newest",
            SortMode::Rating => "Highest Rated",
            SortMode::Bestseller => "Best Selling",
        }
    }
}

/// Structured filters, combined conjunctively.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilterSet {
    /// Filter by category.
    pub category: Option<CategoryId>,
    /// Filter by sub-category.
    pub sub_category: Option<CategoryId>,
    /// Filter by brand (case-insensitive equality).
    pub brand: Option<String>,
    /// Minimum price in minor units, inclusive.
    pub min_price: Option<i64>,
    /// Maximum price in minor units, inclusive.
    pub max_price: Option<i64>,
    /// Filter to products compatible with a skin type.
    pub skin_type: Option<SkinType>,
    /// New-arrival flag.
    pub is_new: Option<bool>,
    /// Bestseller flag.
    pub is_bestseller: Option<bool>,
    /// Featured flag.
    pub featured: Option<bool>,
}

impl FilterSet {
    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        *self == FilterSet::default()
    }

    /// Whether a price bound is set.
    pub fn has_price(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Copy with the price bounds removed.
    pub fn without_price(&self) -> Self {
        Self {
            min_price: None,
            max_price: None,
            ..self.clone()
        }
    }

    /// Copy with the category dimension removed.
    pub fn without_category(&self) -> Self {
        Self {
            category: None,
            sub_category: None,
            ..self.clone()
        }
    }

    /// Copy with the brand dimension removed.
    pub fn without_brand(&self) -> Self {
        Self {
            brand: None,
            ..self.clone()
        }
    }
}

/// A canonical search query, produced by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Matching form of the free-text term: trimmed and lowercased.
    pub term: String,
    /// Original-case copy of the term, for suggestion echoing.
    pub raw_term: String,
    /// Structured filters.
    pub filters: FilterSet,
    /// Sort mode.
    pub sort: SortMode,
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
}

impl SearchQuery {
    /// Whether a free-text term is present.
    pub fn has_term(&self) -> bool {
        !self.term.is_empty()
    }

    /// Whitespace tokens of the matching-form term.
    pub fn tokens(&self) -> Vec<&str> {
        self.term.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_round_trip() {
        for mode in [
            SortMode::Relevance,
            SortMode::PriceAsc,
            SortMode::PriceDesc,
            SortMode::Newest,
            SortMode::Rating,
            SortMode::Bestseller,
        ] {
            assert_eq!(SortMode::from_str(mode.as_str()), mode);
        }
    }

    #[test]
    fn test_unknown_sort_falls_back_to_relevance() {
        assert_eq!(SortMode::from_str("position"), SortMode::Relevance);
        assert_eq!(SortMode::from_str(""), SortMode::Relevance);
    }

    #[test]
    fn test_filter_set_dimension_removal() {
        let filters = FilterSet {
            category: Some(CategoryId::new("skincare")),
            brand: Some("glow-lab".to_string()),
            min_price: Some(10_000),
            ..Default::default()
        };
        assert!(filters.without_category().category.is_none());
        assert!(filters.without_category().brand.is_some());
        assert!(!filters.without_price().has_price());
        assert!(filters.without_brand().brand.is_none());
    }

    #[test]
    fn test_tokens() {
        let query = SearchQuery {
            term: "vitamin c serum".to_string(),
            ..Default::default()
        };
        assert_eq!(query.tokens(), vec!["vitamin", "c", "serum"]);
    }
}
