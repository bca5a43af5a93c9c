//! JSON response shapes consumed by the storefront frontend.
//!
//! All wire fields are camelCase. The internal facet summary carries
//! per-value counts; the wire `filters` object flattens those to the
//! plain value arrays the frontend renders.

use glow_catalog::Product;
use glow_recommend::Recommendations;
use glow_search::{FacetSummary, Pagination, PopularSearches, ResultEnvelope};
use serde::{Deserialize, Serialize};

/// A product as serialized to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub brand: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Price in minor currency units.
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<i64>,
    pub currency: String,
    pub inventory: i64,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub featured: bool,
    pub rating: RatingDto,
    pub wishlist_count: i64,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub published_at: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingDto {
    pub average: f64,
    pub count: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.into_inner(),
            name: p.name,
            description: p.description,
            short_description: p.short_description,
            brand: p.brand,
            category: p.category.into_inner(),
            sub_category: p.sub_category.map(|c| c.into_inner()),
            price: p.price.amount_minor,
            compare_at_price: p.compare_at_price.map(|m| m.amount_minor),
            currency: p.price.currency.code().to_string(),
            inventory: p.inventory,
            is_new: p.is_new,
            is_bestseller: p.is_bestseller,
            featured: p.featured,
            rating: RatingDto {
                average: p.rating.average,
                count: p.rating.count,
            },
            wishlist_count: p.wishlist_count,
            tags: p.tags,
            created_at: p.created_at,
            published_at: p.published_at,
        }
    }
}

/// Pagination block of the search envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<Pagination> for PaginationDto {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.page,
            total_pages: p.total_pages,
            total_count: p.total,
            limit: p.per_page,
            has_next_page: p.has_next,
            has_prev_page: p.has_prev,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRangeDto {
    pub min: i64,
    pub max: i64,
}

/// Facet block of the search envelope: plain value arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersDto {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price_range: PriceRangeDto,
}

impl From<FacetSummary> for FiltersDto {
    fn from(facets: FacetSummary) -> Self {
        Self {
            categories: facets.categories.into_iter().map(|v| v.value).collect(),
            brands: facets.brands.into_iter().map(|v| v.value).collect(),
            price_range: facets
                .price_range
                .map(|r| PriceRangeDto {
                    min: r.min,
                    max: r.max,
                })
                .unwrap_or(PriceRangeDto { min: 0, max: 0 }),
        }
    }
}

/// `GET /search` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub products: Vec<ProductDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub filters: FiltersDto,
    pub pagination: PaginationDto,
}

impl From<ResultEnvelope> for SearchResponse {
    fn from(envelope: ResultEnvelope) -> Self {
        Self {
            products: envelope.products.into_iter().map(ProductDto::from).collect(),
            suggestions: if envelope.suggestions.is_empty() {
                None
            } else {
                Some(envelope.suggestions)
            },
            filters: envelope.facets.into(),
            pagination: envelope.pagination.into(),
        }
    }
}

/// `GET /search/autocomplete` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

/// `GET /search/popular` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularResponse {
    pub popular_searches: Vec<String>,
    pub title: String,
}

impl From<PopularSearches> for PopularResponse {
    fn from(p: PopularSearches) -> Self {
        Self {
            popular_searches: p.terms,
            title: p.title,
        }
    }
}

/// `GET /search/filters` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub filters: FiltersDto,
}

/// `GET /recommendations/{type}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub products: Vec<ProductDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl From<Recommendations> for RecommendationResponse {
    fn from(recs: Recommendations) -> Self {
        Self {
            products: recs.products.into_iter().map(ProductDto::from).collect(),
            reason: recs.reason,
            based_on: recs.based_on,
            confidence: recs.confidence,
        }
    }
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `POST /recommendations/track` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackBody {
    #[serde(default)]
    pub user_id: Option<String>,
    pub product_id: String,
    /// Interaction kind; defaults to a view.
    #[serde(default, rename = "type", alias = "interactionType")]
    pub kind: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_catalog::Money;

    #[test]
    fn test_product_dto_camel_case() {
        let mut product = Product::new("Vitamin C Serum", "glow-lab", "skincare", Money::krw(68_000));
        product.compare_at_price = Some(Money::krw(80_000));
        product.is_new = true;

        let json = serde_json::to_value(ProductDto::from(product)).unwrap();
        assert_eq!(json["price"], 68_000);
        assert_eq!(json["compareAtPrice"], 80_000);
        assert_eq!(json["isNew"], true);
        assert_eq!(json["currency"], "KRW");
        assert!(json.get("is_new").is_none());
    }

    #[test]
    fn test_empty_suggestions_omitted() {
        let envelope = ResultEnvelope {
            products: Vec::new(),
            suggestions: Vec::new(),
            facets: FacetSummary::default(),
            pagination: Pagination::default(),
        };
        let json = serde_json::to_value(SearchResponse::from(envelope)).unwrap();
        assert!(json.get("suggestions").is_none());
        assert_eq!(json["pagination"]["totalCount"], 0);
    }

    #[test]
    fn test_track_body_accepts_alias() {
        let body: TrackBody =
            serde_json::from_str(r#"{"productId":"p-1","interactionType":"purchase"}"#).unwrap();
        assert_eq!(body.kind.as_deref(), Some("purchase"));
        let body: TrackBody =
            serde_json::from_str(r#"{"productId":"p-1","type":"view"}"#).unwrap();
        assert_eq!(body.kind.as_deref(), Some("view"));
    }
}
