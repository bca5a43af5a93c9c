//! Filter predicates over the candidate set.
//!
//! Structured filters are conjunctive; price bounds are inclusive on both
//! ends. The free-text predicate is a deliberately simple matching
//! policy, not a full-text index: the term is tokenized on whitespace and
//! every token must be a case-insensitive substring of the product's
//! name, brand, or either description field.

use crate::query::{FilterSet, SearchQuery};
use glow_catalog::{Product, SkinCompatibility};

/// Whether a product passes every structured filter.
pub fn matches_filters(
    product: &Product,
    filters: &FilterSet,
    compat: &SkinCompatibility,
) -> bool {
    if let Some(category) = &filters.category {
        if &product.category != category {
            return false;
        }
    }
    if let Some(sub) = &filters.sub_category {
        if product.sub_category.as_ref() != Some(sub) {
            return false;
        }
    }
    if let Some(brand) = &filters.brand {
        if !product.brand.eq_ignore_ascii_case(brand) {
            return false;
        }
    }
    if let Some(min) = filters.min_price {
        if product.price.amount_minor < min {
            return false;
        }
    }
    if let Some(max) = filters.max_price {
        if product.price.amount_minor > max {
            return false;
        }
    }
    if let Some(skin) = filters.skin_type {
        if !compat.is_compatible(skin, product) {
            return false;
        }
    }
    if let Some(is_new) = filters.is_new {
        if product.is_new != is_new {
            return false;
        }
    }
    if let Some(is_bestseller) = filters.is_bestseller {
        if product.is_bestseller != is_bestseller {
            return false;
        }
    }
    if let Some(featured) = filters.featured {
        if product.featured != featured {
            return false;
        }
    }
    true
}

/// Whether every token matches the product's text fields.
pub fn matches_term(product: &Product, tokens: &[&str]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let name = product.name.to_lowercase();
    let brand = product.brand.to_lowercase();
    let description = product
        .description
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let short_description = product
        .short_description
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    tokens.iter().all(|token| {
        name.contains(token)
            || brand.contains(token)
            || description.contains(token)
            || short_description.contains(token)
    })
}

/// Whether a product matches the whole query (term and filters).
pub fn matches(product: &Product, query: &SearchQuery, compat: &SkinCompatibility) -> bool {
    matches_term(product, &query.tokens()) && matches_filters(product, &query.filters, compat)
}

/// Narrow the catalog to the candidate set for a query.
pub fn apply<'a>(
    products: &'a [Product],
    query: &SearchQuery,
    compat: &SkinCompatibility,
) -> Vec<&'a Product> {
    let tokens = query.tokens();
    products
        .iter()
        .filter(|p| matches_term(p, &tokens) && matches_filters(p, &query.filters, compat))
        .collect()
}
