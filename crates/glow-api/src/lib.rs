//! HTTP-shaped JSON contract for the GlowCommerce storefront.
//!
//! This crate is transport-agnostic: it parses query strings and JSON
//! bodies, dispatches to the search and recommendation services, and
//! produces the camelCase response shapes the frontend consumes. Any
//! HTTP server (or a test) drives it through [`CommerceApi::handle`].
//!
//! Routes:
//!
//! - `GET /search` — the full search envelope
//! - `GET /search/autocomplete` — completion suggestions
//! - `GET /search/popular` — popular search terms
//! - `GET /search/filters` — facet summary with no query applied
//! - `GET /recommendations/{type}` — one of the recommendation surfaces
//! - `POST /recommendations/track`, `POST /recommendations/track-interaction`
//!   — fire-and-forget interaction ingestion

pub mod handler;
pub mod params;
pub mod response;

pub use handler::{ApiRequest, ApiResponse, CommerceApi, Method};
pub use params::{parse_query, raw_search_query, recommendation_params};
pub use response::{
    AutocompleteResponse, ErrorResponse, FiltersDto, FiltersResponse, PaginationDto,
    PopularResponse, PriceRangeDto, ProductDto, RatingDto, RecommendationResponse,
    SearchResponse, TrackBody,
};
