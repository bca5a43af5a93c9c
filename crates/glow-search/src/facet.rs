//! Facet computation for search refinement.
//!
//! Counts for a facet dimension are computed over the set filtered by
//! every dimension except the facet's own. Selecting a category must not
//! hide the brand facet for brands inside that category, while counts
//! shown for other categories still reflect what picking them instead
//! would return.

use crate::filter;
use crate::query::SearchQuery;
use glow_catalog::{Product, SkinCompatibility};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single facet value with its match count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value (category id, brand name).
    pub value: String,
    /// Number of products that picking this value would return.
    pub count: i64,
    /// Whether currently selected.
    pub selected: bool,
}

/// Inclusive price bounds over the candidate set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: i64,
    pub max: i64,
}

/// Facet summary returned with every search envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FacetSummary {
    /// Available categories with counts.
    pub categories: Vec<FacetValue>,
    /// Available brands with counts.
    pub brands: Vec<FacetValue>,
    /// Price range across the candidate set.
    pub price_range: Option<PriceBounds>,
}

/// Compute the facet summary for a query over the full catalog.
pub fn compute(
    products: &[Product],
    query: &SearchQuery,
    compat: &SkinCompatibility,
) -> FacetSummary {
    let tokens = query.tokens();

    // Category counts: every filter except the category dimension.
    let category_filters = query.filters.without_category();
    let mut category_counts: BTreeMap<String, i64> = BTreeMap::new();
    // Brand counts: every filter except the brand dimension.
    let brand_filters = query.filters.without_brand();
    let mut brand_counts: BTreeMap<String, i64> = BTreeMap::new();
    // Price range: every filter except the price bounds.
    let price_filters = query.filters.without_price();
    let mut bounds: Option<PriceBounds> = None;

    for product in products {
        if !filter::matches_term(product, &tokens) {
            continue;
        }
        if filter::matches_filters(product, &category_filters, compat) {
            *category_counts
                .entry(product.category.as_str().to_string())
                .or_insert(0) += 1;
        }
        if filter::matches_filters(product, &brand_filters, compat) {
            *brand_counts.entry(product.brand.clone()).or_insert(0) += 1;
        }
        if filter::matches_filters(product, &price_filters, compat) {
            let price = product.price.amount_minor;
            bounds = Some(match bounds {
                None => PriceBounds {
                    min: price,
                    max: price,
                },
                Some(b) => PriceBounds {
                    min: b.min.min(price),
                    max: b.max.max(price),
                },
            });
        }
    }

    let selected_category = query.filters.category.as_ref().map(|c| c.as_str());
    let selected_brand = query.filters.brand.as_deref();

    FacetSummary {
        categories: to_values(category_counts, selected_category),
        brands: to_values(brand_counts, selected_brand),
        price_range: bounds,
    }
}

/// Sort counted values by count descending, then name, and mark the
/// selected one.
fn to_values(counts: BTreeMap<String, i64>, selected: Option<&str>) -> Vec<FacetValue> {
    let mut values: Vec<FacetValue> = counts
        .into_iter()
        .map(|(value, count)| FacetValue {
            selected: selected.is_some_and(|s| s.eq_ignore_ascii_case(&value)),
            value,
            count,
        })
        .collect();
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterSet;
    use glow_catalog::{CategoryId, Money};

    fn fixture() -> Vec<Product> {
        let mut products = Vec::new();
        for (name, brand, category, price) in [
            ("Vitamin C Serum", "glow-lab", "skincare", 68_000),
            ("Retinol Serum", "glow-lab", "skincare", 85_000),
            ("Hydra Cream", "dewpoint", "skincare", 42_000),
            ("Rose Eau de Parfum", "aurella", "fragrance", 95_000),
            ("Velvet Lip Tint", "aurella", "makeup", 18_000),
        ] {
            products.push(Product::new(name, brand, category, Money::krw(price)));
        }
        products
    }

    #[test]
    fn test_unfiltered_counts() {
        let products = fixture();
        let summary = compute(
            &products,
            &SearchQuery::default(),
            &SkinCompatibility::default(),
        );

        assert_eq!(summary.categories[0].value, "skincare");
        assert_eq!(summary.categories[0].count, 3);
        assert_eq!(summary.brands.len(), 3);
        let range = summary.price_range.unwrap();
        assert_eq!(range.min, 18_000);
        assert_eq!(range.max, 95_000);
    }

    #[test]
    fn test_selected_category_keeps_other_category_counts() {
        let products = fixture();
        let query = SearchQuery {
            filters: FilterSet {
                category: Some(CategoryId::new("skincare")),
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = compute(&products, &query, &SkinCompatibility::default());

        // Other categories still show what picking them instead would return.
        assert!(summary.categories.iter().any(|v| v.value == "fragrance" && v.count == 1));
        assert!(summary
            .categories
            .iter()
            .any(|v| v.value == "skincare" && v.selected));
        // Brand facet reflects the category narrowing.
        assert!(summary.brands.iter().any(|v| v.value == "glow-lab" && v.count == 2));
        assert!(!summary.brands.iter().any(|v| v.value == "aurella"));
    }

    #[test]
    fn test_brand_filter_does_not_narrow_brand_facet() {
        let products = fixture();
        let query = SearchQuery {
            filters: FilterSet {
                brand: Some("aurella".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = compute(&products, &query, &SkinCompatibility::default());

        assert!(summary.brands.iter().any(|v| v.value == "glow-lab" && v.count == 2));
        assert!(summary.brands.iter().any(|v| v.value == "aurella" && v.selected));
    }

    #[test]
    fn test_price_range_ignores_price_filter() {
        let products = fixture();
        let query = SearchQuery {
            filters: FilterSet {
                min_price: Some(90_000),
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = compute(&products, &query, &SkinCompatibility::default());
        let range = summary.price_range.unwrap();
        assert_eq!(range.min, 18_000);
        assert_eq!(range.max, 95_000);
    }

    #[test]
    fn test_term_always_applies() {
        let products = fixture();
        let query = SearchQuery {
            term: "serum".to_string(),
            ..Default::default()
        };
        let summary = compute(&products, &query, &SkinCompatibility::default());
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].count, 2);
    }
}
