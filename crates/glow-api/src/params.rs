//! Query-string parsing.
//!
//! The search parameters stay stringly-typed here; coercion and
//! clamping belong to the normalizer, which is total and never rejects.

use glow_catalog::ProductId;
use glow_recommend::{RecommendationRequest, RecommendationType};
use glow_search::RawQuery;
use std::collections::HashMap;

/// Parse a query string into a key/value map. Later duplicates win.
pub fn parse_query(qs: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in qs.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        if key.is_empty() {
            continue;
        }
        params.insert(percent_decode(key), percent_decode(value));
    }
    params
}

/// Build the raw search query from parsed parameters.
pub fn raw_search_query(params: &HashMap<String, String>) -> RawQuery {
    RawQuery {
        q: params.get("q").cloned(),
        category: params.get("category").cloned(),
        sub_category: params.get("subCategory").cloned(),
        brand: params.get("brand").cloned(),
        min_price: params.get("minPrice").cloned(),
        max_price: params.get("maxPrice").cloned(),
        skin_type: params.get("skinType").cloned(),
        is_new: params.get("isNew").cloned(),
        is_bestseller: params.get("isBestseller").cloned(),
        featured: params.get("featured").cloned(),
        sort_by: params.get("sortBy").cloned(),
        page: params.get("page").cloned(),
        limit: params.get("limit").cloned(),
    }
}

/// Build a recommendation request from parsed parameters.
///
/// Numeric coercion is as lenient as the search normalizer: a garbage
/// limit falls back to the default, and the exclusion list drops empty
/// entries.
pub fn recommendation_params(
    rec_type: RecommendationType,
    params: &HashMap<String, String>,
) -> RecommendationRequest {
    let mut request = RecommendationRequest::new(rec_type);
    if let Some(user) = params.get("userId").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        request = request.with_user(user);
    }
    if let Some(product) = params
        .get("productId")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        request = request.with_product(product);
    }
    if let Some(category) = params
        .get("category")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        request = request.with_category(category);
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.trim().parse::<i64>().ok()) {
        request = request.with_limit(limit);
    }
    if let Some(exclude) = params.get("exclude") {
        let ids: Vec<ProductId> = exclude
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ProductId::new)
            .collect();
        request = request.with_exclusions(ids);
    }
    request
}

/// Decode percent-escapes and `+` as space, tolerating malformed input.
fn percent_decode(s: &str) -> String {
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                bytes.push(byte);
            }
        } else if c == '+' {
            bytes.push(b' ');
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
