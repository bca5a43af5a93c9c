//! Product search engine for GlowCommerce.
//!
//! The pipeline a search request flows through:
//!
//! 1. **Normalize** — raw text and stringly filter parameters become a
//!    canonical [`SearchQuery`]; normalization is total and never fails
//! 2. **Filter** — conjunctive structured predicates plus a tokenized
//!    substring text match narrow the catalog to the candidate set
//! 3. **Facet** — available categories, brands, and the price range are
//!    counted over the all-filters-except-own-dimension set
//! 4. **Rank** — the candidate set gets a total order per sort mode;
//!    relevance mode combines text strength, recency, and popularity
//! 5. **Paginate** — the ranked sequence is sliced deterministically
//!
//! [`SearchService`] composes the pipeline behind a single entry point
//! and owns the zero-result suggestion, autocomplete, and popular-search
//! surfaces.
//!
//! # Example
//!
//! ```rust,ignore
//! use glow_search::prelude::*;
//!
//! let service = SearchService::new(store);
//! let envelope = service
//!     .search(RawQuery {
//!         q: Some("vitamin serum".into()),
//!         sort_by: Some("price_asc".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod facet;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod query;
pub mod rank;
pub mod service;
pub mod suggest;

pub use config::{RelevanceConfig, SearchConfig};
pub use error::SearchError;
pub use facet::{FacetSummary, FacetValue, PriceBounds};
pub use normalize::{normalize, RawQuery};
pub use paginate::{paginate, Pagination};
pub use query::{FilterSet, SearchQuery, SortMode};
pub use rank::{rank, RankedCandidate, ScoreSignals};
pub use service::{PopularSearches, ResultEnvelope, SearchService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{RelevanceConfig, SearchConfig};
    pub use crate::error::SearchError;
    pub use crate::facet::{FacetSummary, FacetValue, PriceBounds};
    pub use crate::normalize::{normalize, RawQuery};
    pub use crate::paginate::{paginate, Pagination};
    pub use crate::query::{FilterSet, SearchQuery, SortMode};
    pub use crate::rank::{rank, RankedCandidate, ScoreSignals};
    pub use crate::service::{PopularSearches, ResultEnvelope, SearchService};
}
