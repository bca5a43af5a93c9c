//! Query normalization.
//!
//! Turns raw request parameters into a canonical [`SearchQuery`].
//! Normalization is total: bad numeric strings are discarded, inverted
//! price bounds are swapped, page and page size are clamped. It never
//! rejects a request.

use crate::config::SearchConfig;
use crate::query::{FilterSet, SearchQuery, SortMode};
use glow_catalog::{CategoryId, SkinType};

/// Raw search parameters as they arrive from the transport layer.
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub skin_type: Option<String>,
    pub is_new: Option<String>,
    pub is_bestseller: Option<String>,
    pub featured: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Produce a canonical query from raw parameters.
pub fn normalize(raw: RawQuery, config: &SearchConfig) -> SearchQuery {
    let raw_term = raw.q.as_deref().unwrap_or("").trim().to_string();
    let term = raw_term.to_lowercase();

    let mut min_price = parse_price(raw.min_price.as_deref());
    let mut max_price = parse_price(raw.max_price.as_deref());
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min > max {
            min_price = Some(max);
            max_price = Some(min);
        }
    }

    let filters = FilterSet {
        category: parse_category(raw.category.as_deref()),
        sub_category: parse_category(raw.sub_category.as_deref()),
        brand: raw
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string),
        min_price,
        max_price,
        skin_type: raw
            .skin_type
            .as_deref()
            .and_then(|s| SkinType::from_str(s.trim())),
        is_new: parse_flag(raw.is_new.as_deref()),
        is_bestseller: parse_flag(raw.is_bestseller.as_deref()),
        featured: parse_flag(raw.featured.as_deref()),
    };

    let page = raw
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);

    let per_page = raw
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<i64>().ok())
        .unwrap_or(config.default_per_page)
        .clamp(1, config.max_per_page);

    SearchQuery {
        term,
        raw_term,
        filters,
        sort: SortMode::from_str(raw.sort_by.as_deref().unwrap_or("").trim()),
        page,
        per_page,
    }
}

/// Coerce a price string; garbage and negatives are discarded.
fn parse_price(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 0)
}

/// Coerce a boolean flag; anything but true/1/false/0 is absent.
fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw.map(str::trim) {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

fn parse_category(raw: Option<&str>) -> Option<CategoryId> {
    raw.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(CategoryId::new)
}
