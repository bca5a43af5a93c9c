//! Alternate-query suggestions, autocomplete, and popular searches.
//!
//! Suggestions are built by relaxing the query one step at a time and
//! re-running the match predicate. Each relaxation costs a single linear
//! pass over the catalog, so the whole computation stays bounded.

use crate::filter;
use crate::query::SearchQuery;
use glow_catalog::{Product, SkinCompatibility};
use std::collections::HashMap;

/// Suggest up to `max` alternate queries for a search that came up empty.
///
/// The relaxation ladder:
/// 1. multi-token terms: drop the least-frequent token
/// 2. drop the price bounds, keeping the rest of the query
/// 3. drop all structured filters, keeping the term
/// 4. individual tokens of a multi-token term
pub fn suggestions(
    products: &[Product],
    query: &SearchQuery,
    compat: &SkinCompatibility,
    max: usize,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if max == 0 {
        return out;
    }
    let tokens = query.tokens();
    let raw_tokens: Vec<&str> = query.raw_term.split_whitespace().collect();

    // 1. Drop the least-frequent token of a multi-token term.
    if tokens.len() >= 2 && tokens.len() == raw_tokens.len() {
        let frequencies: Vec<usize> = tokens
            .iter()
            .map(|t| {
                products
                    .iter()
                    .filter(|p| filter::matches_term(p, std::slice::from_ref(t)))
                    .count()
            })
            .collect();
        if let Some((drop_idx, _)) = frequencies.iter().enumerate().min_by_key(|(_, c)| **c) {
            let reduced: Vec<&str> = tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != drop_idx)
                .map(|(_, t)| *t)
                .collect();
            let reduced_raw = raw_tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != drop_idx)
                .map(|(_, t)| *t)
                .collect::<Vec<_>>()
                .join(" ");
            let with_filters = products.iter().any(|p| {
                filter::matches_term(p, &reduced)
                    && filter::matches_filters(p, &query.filters, compat)
            });
            let term_only = with_filters
                || products.iter().any(|p| filter::matches_term(p, &reduced));
            if term_only {
                push_unique(&mut out, reduced_raw);
            }
        }
    }

    // 2. Relax the price bounds.
    if query.filters.has_price() {
        let relaxed = query.filters.without_price();
        let any = products.iter().any(|p| {
            filter::matches_term(p, &tokens) && filter::matches_filters(p, &relaxed, compat)
        });
        if any {
            if query.has_term() {
                push_unique(&mut out, query.raw_term.clone());
            } else if let Some(category) = &query.filters.category {
                push_unique(&mut out, category.as_str().to_string());
            } else if let Some(brand) = &query.filters.brand {
                push_unique(&mut out, brand.clone());
            }
        }
    }

    // 3. Drop all structured filters, keep the term.
    if query.has_term() && !query.filters.is_empty() {
        let any = products.iter().any(|p| filter::matches_term(p, &tokens));
        if any {
            push_unique(&mut out, query.raw_term.clone());
        }
    }

    // 4. Individual tokens.
    if tokens.len() >= 2 && tokens.len() == raw_tokens.len() {
        for (i, token) in tokens.iter().enumerate() {
            if out.len() >= max {
                break;
            }
            let any = products
                .iter()
                .any(|p| filter::matches_term(p, std::slice::from_ref(token)));
            if any {
                push_unique(&mut out, raw_tokens[i].to_string());
            }
        }
    }

    out.truncate(max);
    out
}

/// Case-insensitive completion over product names, brands, and
/// categories. Queries shorter than `min_chars` return nothing; prefix
/// matches rank before interior matches.
pub fn autocomplete(
    products: &[Product],
    q: &str,
    limit: usize,
    min_chars: usize,
) -> Vec<String> {
    let q = q.trim();
    if q.chars().count() < min_chars {
        return Vec::new();
    }
    let q_lower = q.to_lowercase();

    let mut seen: Vec<String> = Vec::new();
    let mut hits: Vec<(u8, String)> = Vec::new();
    for product in products {
        for value in [
            product.name.as_str(),
            product.brand.as_str(),
            product.category.as_str(),
        ] {
            let lower = value.to_lowercase();
            if !lower.contains(&q_lower) || seen.contains(&lower) {
                continue;
            }
            seen.push(lower.clone());
            let rank = if lower.starts_with(&q_lower) { 0 } else { 1 };
            hits.push((rank, value.to_string()));
        }
    }
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    hits.into_iter().map(|(_, v)| v).take(limit).collect()
}

/// Popular search terms derived from catalog engagement: brands and
/// categories weighted by wishlist and review volume.
pub fn popular(products: &[Product], limit: usize) -> Vec<String> {
    let mut scores: HashMap<String, i64> = HashMap::new();
    for product in products {
        let engagement = product.wishlist_count.max(0) + product.rating.count.max(0);
        *scores.entry(product.brand.clone()).or_insert(0) += engagement;
        *scores
            .entry(product.category.as_str().to_string())
            .or_insert(0) += engagement;
    }
    let mut entries: Vec<(String, i64)> = scores.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.into_iter().map(|(term, _)| term).take(limit).collect()
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if candidate.is_empty() {
        return;
    }
    if out.iter().any(|s| s.eq_ignore_ascii_case(&candidate)) {
        return;
    }
    out.push(candidate);
}
