//! Search error types.
//!
//! Input malformation is never an error here: normalization is total.
//! The only failure the engine propagates is an unreachable data source,
//! so callers can tell "no matches" from "search is down".

use glow_catalog::StoreError;
use thiserror::Error;

/// Errors that can occur during a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The catalog data source failed.
    #[error("catalog store error: {0}")]
    Store(#[from] StoreError),
}
