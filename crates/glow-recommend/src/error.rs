//! Recommendation error types.

use glow_catalog::StoreError;
use thiserror::Error;

/// Errors that can occur while generating recommendations.
///
/// Missing signal data (no history, no declared skin type, no subject
/// product) is handled by the fallback chain, not surfaced here.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// A data source failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
