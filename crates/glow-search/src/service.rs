//! The search facade.
//!
//! `SearchService` is the single entry point callers use: it composes
//! normalization, filtering, facet computation, ranking, and pagination
//! into one request-scoped computation. The catalog store is injected at
//! construction, so tests run the full pipeline against fixture data.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::facet::{self, FacetSummary};
use crate::filter;
use crate::normalize::{normalize, RawQuery};
use crate::paginate::{paginate, Pagination};
use crate::rank;
use crate::suggest;
use glow_catalog::product::current_timestamp;
use glow_catalog::{CatalogStore, Product};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// The immutable result of one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Products for the current page, in rank order.
    pub products: Vec<Product>,
    /// Alternate queries, populated when the result count is low.
    pub suggestions: Vec<String>,
    /// Facet summary over the candidate set.
    pub facets: FacetSummary,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// Popular search terms with their display heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularSearches {
    pub terms: Vec<String>,
    pub title: String,
}

/// Facade over the search pipeline.
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a service with the default configuration.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    /// Create a service with a custom configuration.
    pub fn with_config(store: Arc<dyn CatalogStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a search request.
    pub async fn search(&self, raw: RawQuery) -> Result<ResultEnvelope, SearchError> {
        self.search_at(raw, current_timestamp()).await
    }

    /// Run a search request against a pinned clock.
    pub async fn search_at(&self, raw: RawQuery, now: i64) -> Result<ResultEnvelope, SearchError> {
        let query = normalize(raw, &self.config);
        let products = self.store.products().await?;

        let candidates: Vec<Product> = filter::apply(&products, &query, &self.config.skin_compat)
            .into_iter()
            .cloned()
            .collect();
        let facets = facet::compute(&products, &query, &self.config.skin_compat);

        let ranked = rank::rank(candidates, &query, &self.config.relevance, now);
        let ordered: Vec<Product> = ranked.into_iter().map(|c| c.product).collect();
        let (page_items, pagination) = paginate(ordered, query.page, query.per_page);

        let suggestions = if pagination.total < self.config.suggest_below {
            suggest::suggestions(
                &products,
                &query,
                &self.config.skin_compat,
                self.config.max_suggestions,
            )
        } else {
            Vec::new()
        };

        debug!(
            term = %query.term,
            sort = query.sort.as_str(),
            page = pagination.page,
            total = pagination.total,
            suggestions = suggestions.len(),
            "search executed"
        );

        Ok(ResultEnvelope {
            products: page_items,
            suggestions,
            facets,
            pagination,
        })
    }

    /// Autocomplete a partial query.
    pub async fn autocomplete(&self, q: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let products = self.store.products().await?;
        Ok(suggest::autocomplete(
            &products,
            q,
            limit,
            self.config.autocomplete_min_chars,
        ))
    }

    /// Popular search terms derived from catalog engagement.
    pub async fn popular(&self, limit: usize) -> Result<PopularSearches, SearchError> {
        let products = self.store.products().await?;
        Ok(PopularSearches {
            terms: suggest::popular(&products, limit),
            title: self.config.popular_title.clone(),
        })
    }

    /// The facet summary with no query applied.
    pub async fn facet_defaults(&self) -> Result<FacetSummary, SearchError> {
        let products = self.store.products().await?;
        Ok(facet::compute(
            &products,
            &Default::default(),
            &self.config.skin_compat,
        ))
    }
}
