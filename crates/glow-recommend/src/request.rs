//! Recommendation request and response types.

use glow_catalog::{CategoryId, Product, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// The closed set of recommendation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationType {
    /// Blend of the user's browsing and purchase history.
    Personalized,
    /// Products sharing category and attributes with a subject product.
    Similar,
    /// Recent interaction velocity.
    Trending,
    /// Products compatible with the user's declared skin type.
    SkinType,
    /// Products near the user's recently viewed items.
    BrowsingHistory,
    /// Products near the user's recent purchases.
    PurchaseHistory,
    /// A category ranked by the default browse ordering.
    Category,
    /// Co-purchased products from other categories.
    Complementary,
    /// Co-purchased products, any category.
    FrequentlyBoughtTogether,
    /// Recently published products.
    NewArrivals,
    /// Bestseller flag, then wishlist count.
    Bestsellers,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Personalized => "personalized",
            RecommendationType::Similar => "similar",
            RecommendationType::Trending => "trending",
            RecommendationType::SkinType => "skin-type",
            RecommendationType::BrowsingHistory => "browsing-history",
            RecommendationType::PurchaseHistory => "purchase-history",
            RecommendationType::Category => "category",
            RecommendationType::Complementary => "complementary",
            RecommendationType::FrequentlyBoughtTogether => "frequently-bought-together",
            RecommendationType::NewArrivals => "new-arrivals",
            RecommendationType::Bestsellers => "bestsellers",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "personalized" => Some(RecommendationType::Personalized),
            "similar" => Some(RecommendationType::Similar),
            "trending" => Some(RecommendationType::Trending),
            "skin-type" => Some(RecommendationType::SkinType),
            "browsing-history" => Some(RecommendationType::BrowsingHistory),
            "purchase-history" => Some(RecommendationType::PurchaseHistory),
            "category" => Some(RecommendationType::Category),
            "complementary" => Some(RecommendationType::Complementary),
            "frequently-bought-together" => Some(RecommendationType::FrequentlyBoughtTogether),
            "new-arrivals" => Some(RecommendationType::NewArrivals),
            "bestsellers" => Some(RecommendationType::Bestsellers),
            _ => None,
        }
    }
}

/// A recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Which surface to produce.
    pub rec_type: RecommendationType,
    /// Subject user, for personalization surfaces.
    pub user_id: Option<UserId>,
    /// Subject product, for similarity surfaces.
    pub product_id: Option<ProductId>,
    /// Optional category constraint.
    pub category: Option<CategoryId>,
    /// Requested number of products.
    pub limit: i64,
    /// Product ids that must never appear in the output.
    pub exclude: Vec<ProductId>,
}

impl RecommendationRequest {
    /// Create a request with the default count.
    pub fn new(rec_type: RecommendationType) -> Self {
        Self {
            rec_type,
            user_id: None,
            product_id: None,
            category: None,
            limit: 10,
            exclude: Vec::new(),
        }
    }

    /// Set the subject user.
    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the subject product.
    pub fn with_product(mut self, product_id: impl Into<ProductId>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Constrain to a category.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the requested count.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Add ids to the exclusion set.
    pub fn with_exclusions(mut self, exclude: Vec<ProductId>) -> Self {
        self.exclude = exclude;
        self
    }
}

/// The products produced for a recommendation surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    /// Ranked products, already truncated to the requested count.
    pub products: Vec<Product>,
    /// Human-readable explanation of the surface.
    pub reason: Option<String>,
    /// What the recommendation was computed from.
    pub based_on: Option<String>,
    /// Strategy confidence in (0, 1]; lower after a fallback.
    pub confidence: Option<f64>,
}

impl Recommendations {
    /// An empty result.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            reason: None,
            based_on: None,
            confidence: None,
        }
    }
}
