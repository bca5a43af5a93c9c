//! Search configuration.
//!
//! Ranking weights and pagination limits are tunable here rather than
//! hardcoded at the call sites.

use glow_catalog::SkinCompatibility;

/// Weights and constants for relevance scoring.
#[derive(Debug, Clone)]
pub struct RelevanceConfig {
    /// Weight of the text-match signal (0.0 to 1.0).
    pub text_weight: f64,
    /// Weight of the recency signal (0.0 to 1.0).
    pub recency_weight: f64,
    /// Weight of the popularity signal (0.0 to 1.0).
    pub popularity_weight: f64,
    /// Days for the recency signal to halve.
    pub recency_half_life_days: f64,
    /// Lower bound of the recency signal, so old products are never
    /// zeroed out.
    pub recency_floor: f64,
    /// Wishlist count at which the wishlist signal reaches 0.5.
    pub wishlist_midpoint: f64,
    /// Volume-weighted rating at which the rating signal reaches 0.5.
    pub rating_midpoint: f64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            text_weight: 0.5,
            recency_weight: 0.2,
            popularity_weight: 0.3,
            recency_half_life_days: 90.0,
            recency_floor: 0.1,
            wishlist_midpoint: 100.0,
            rating_midpoint: 8.0,
        }
    }
}

impl RelevanceConfig {
    /// Set the three signal weights.
    pub fn with_weights(mut self, text: f64, recency: f64, popularity: f64) -> Self {
        self.text_weight = text;
        self.recency_weight = recency;
        self.popularity_weight = popularity;
        self
    }

    /// Set the recency half-life in days.
    pub fn with_half_life(mut self, days: f64) -> Self {
        self.recency_half_life_days = days;
        self
    }

    /// Set the recency floor.
    pub fn with_recency_floor(mut self, floor: f64) -> Self {
        self.recency_floor = floor;
        self
    }
}

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Relevance scoring constants.
    pub relevance: RelevanceConfig,
    /// Skin-type compatibility table used by the skin-type filter.
    pub skin_compat: SkinCompatibility,
    /// Page size when the request carries none.
    pub default_per_page: i64,
    /// Upper bound on the requested page size.
    pub max_per_page: i64,
    /// Maximum number of suggested alternate queries.
    pub max_suggestions: usize,
    /// Suggestions are computed when the total result count falls below
    /// this value.
    pub suggest_below: i64,
    /// Minimum query length for autocomplete.
    pub autocomplete_min_chars: usize,
    /// Heading returned with popular searches.
    pub popular_title: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relevance: RelevanceConfig::default(),
            skin_compat: SkinCompatibility::default(),
            default_per_page: 20,
            max_per_page: 100,
            max_suggestions: 5,
            suggest_below: 1,
            autocomplete_min_chars: 2,
            popular_title: "Popular right now".to_string(),
        }
    }
}

impl SearchConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relevance configuration.
    pub fn with_relevance(mut self, relevance: RelevanceConfig) -> Self {
        self.relevance = relevance;
        self
    }

    /// Set the skin-type compatibility table.
    pub fn with_skin_compat(mut self, compat: SkinCompatibility) -> Self {
        self.skin_compat = compat;
        self
    }

    /// Set the default and maximum page sizes.
    pub fn with_page_sizes(mut self, default_per_page: i64, max_per_page: i64) -> Self {
        self.default_per_page = default_per_page;
        self.max_per_page = max_per_page;
        self
    }

    /// Set the suggestion cap.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }
}
