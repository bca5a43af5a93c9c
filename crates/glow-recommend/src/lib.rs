//! Recommendation engine for GlowCommerce.
//!
//! Eleven recommendation surfaces share one shape: a strategy gathers
//! candidates from its signal source (catalog attributes, browsing and
//! purchase history, co-purchase counts, trending windows), scores them
//! with the search engine's popularity/recency primitives, and the
//! result is exclusion-filtered and truncated. Strategies form a closed
//! set dispatched by [`RecommendationEngine`]; there is no plugin
//! registry.
//!
//! Missing signals never produce errors: a user without history or a
//! declared skin type falls back down a documented chain that ends at
//! trending. Only data-source failure propagates.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod request;
pub mod track;

pub use config::RecommendConfig;
pub use engine::RecommendationEngine;
pub use error::RecommendError;
pub use history::{HistoryStore, Interaction, InteractionKind, MemoryHistory};
pub use request::{RecommendationRequest, RecommendationType, Recommendations};
pub use track::InteractionTracker;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::RecommendConfig;
    pub use crate::engine::RecommendationEngine;
    pub use crate::error::RecommendError;
    pub use crate::history::{HistoryStore, Interaction, InteractionKind, MemoryHistory};
    pub use crate::request::{RecommendationRequest, RecommendationType, Recommendations};
    pub use crate::track::InteractionTracker;
}
