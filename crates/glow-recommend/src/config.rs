//! Recommendation configuration.

use glow_catalog::SkinCompatibility;
use glow_search::RelevanceConfig;

/// Tunables for the recommendation strategies.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Window for trending candidates and velocity, in days.
    pub trending_window_days: i64,
    /// How many recent history events seed the history strategies.
    pub history_depth: usize,
    /// Weight of purchase-history candidates in the personalized blend.
    pub purchase_weight: f64,
    /// Weight of browsing-history candidates in the personalized blend.
    pub browse_weight: f64,
    /// Days for a history event's influence to halve.
    pub history_half_life_days: f64,
    /// Weight of general popularity inside the trending score.
    pub trending_popularity_weight: f64,
    /// Upper bound on the requested count.
    pub max_limit: i64,
    /// Skin-type compatibility table.
    pub skin_compat: SkinCompatibility,
    /// Scoring constants shared with the search ranker.
    pub relevance: RelevanceConfig,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            trending_window_days: 30,
            history_depth: 10,
            purchase_weight: 0.7,
            browse_weight: 0.3,
            history_half_life_days: 7.0,
            trending_popularity_weight: 0.25,
            max_limit: 50,
            skin_compat: SkinCompatibility::default(),
            relevance: RelevanceConfig::default(),
        }
    }
}

impl RecommendConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trending window.
    pub fn with_trending_window(mut self, days: i64) -> Self {
        self.trending_window_days = days;
        self
    }

    /// Set the history depth.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Set the purchase/browse blend weights.
    pub fn with_blend_weights(mut self, purchase: f64, browse: f64) -> Self {
        self.purchase_weight = purchase;
        self.browse_weight = browse;
        self
    }

    /// Set the skin-type compatibility table.
    pub fn with_skin_compat(mut self, compat: SkinCompatibility) -> Self {
        self.skin_compat = compat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_thirty_days() {
        assert_eq!(RecommendConfig::default().trending_window_days, 30);
    }

    #[test]
    fn test_purchase_outweighs_browse_by_default() {
        let config = RecommendConfig::default();
        assert!(config.purchase_weight > config.browse_weight);
    }
}
