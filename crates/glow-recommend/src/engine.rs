//! The recommendation engine.
//!
//! One strategy method per recommendation type; all of them produce a
//! sorted candidate list, and `recommend` applies the shared epilogue:
//! drop excluded ids and the subject product, truncate to the requested
//! count. Strategies that find no signal fall back down a chain that
//! ends at trending; only a data-source failure is an error.

use crate::config::RecommendConfig;
use crate::error::RecommendError;
use crate::history::{HistoryStore, Interaction, InteractionKind};
use crate::request::{RecommendationRequest, RecommendationType, Recommendations};
use glow_catalog::product::current_timestamp;
use glow_catalog::{CatalogStore, CategoryId, Product, ProductId};
use glow_search::paginate::paginate;
use glow_search::query::{SearchQuery, SortMode};
use glow_search::rank::{self, RankedCandidate, ScoreSignals};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// What a strategy hands back before the shared epilogue.
struct StrategyOutcome {
    candidates: Vec<RankedCandidate>,
    reason: Option<String>,
    based_on: Option<String>,
    confidence: Option<f64>,
}

/// Dispatcher over the closed strategy set.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogStore>,
    history: Arc<dyn HistoryStore>,
    config: RecommendConfig,
}

impl RecommendationEngine {
    /// Create an engine with the default configuration.
    pub fn new(catalog: Arc<dyn CatalogStore>, history: Arc<dyn HistoryStore>) -> Self {
        Self::with_config(catalog, history, RecommendConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(
        catalog: Arc<dyn CatalogStore>,
        history: Arc<dyn HistoryStore>,
        config: RecommendConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Produce recommendations for a request.
    pub async fn recommend(
        &self,
        req: &RecommendationRequest,
    ) -> Result<Recommendations, RecommendError> {
        self.recommend_at(req, current_timestamp()).await
    }

    /// Produce recommendations against a pinned clock.
    pub async fn recommend_at(
        &self,
        req: &RecommendationRequest,
        now: i64,
    ) -> Result<Recommendations, RecommendError> {
        let outcome = match req.rec_type {
            RecommendationType::Personalized => self.personalized(req, now).await?,
            RecommendationType::Similar => self.similar(req, now).await?,
            RecommendationType::Trending => self.trending(req.category.as_ref(), now).await?,
            RecommendationType::SkinType => self.skin_type(req, now).await?,
            RecommendationType::BrowsingHistory => {
                self.history_based(req, InteractionKind::View, now).await?
            }
            RecommendationType::PurchaseHistory => {
                self.history_based(req, InteractionKind::Purchase, now).await?
            }
            RecommendationType::Category => self.category(req, now).await?,
            RecommendationType::Complementary => self.co_purchased(req, true, now).await?,
            RecommendationType::FrequentlyBoughtTogether => {
                self.co_purchased(req, false, now).await?
            }
            RecommendationType::NewArrivals => {
                self.new_arrivals(req.category.as_ref(), now).await?
            }
            RecommendationType::Bestsellers => {
                self.bestsellers(req.category.as_ref(), now).await?
            }
        };

        let excluded: HashSet<&ProductId> = req.exclude.iter().collect();
        let ordered: Vec<Product> = outcome
            .candidates
            .into_iter()
            .map(|c| c.product)
            .filter(|p| !excluded.contains(&p.id) && Some(&p.id) != req.product_id.as_ref())
            .collect();
        let limit = req.limit.clamp(1, self.config.max_limit);
        let (products, _) = paginate(ordered, 1, limit);

        debug!(
            rec_type = req.rec_type.as_str(),
            count = products.len(),
            "recommendations generated"
        );

        Ok(Recommendations {
            products,
            reason: outcome.reason,
            based_on: outcome.based_on,
            confidence: outcome.confidence,
        })
    }

    /// Candidate pool, optionally narrowed to a category.
    async fn pool(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, RecommendError> {
        Ok(match category {
            Some(c) => self.catalog.products_in_category(c).await?,
            None => self.catalog.products().await?,
        })
    }

    /// Trending: interaction velocity within the window. Velocity is
    /// events per day since publish, so an old catalog staple with a
    /// large raw total does not dominate a fresh riser.
    async fn trending(
        &self,
        category: Option<&CategoryId>,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let window_days = self.config.trending_window_days;
        let cutoff = now - window_days * 86_400;
        let pool = self.pool(category).await?;
        let interactions = self.history.interactions_since(cutoff).await?;

        let mut counts: HashMap<ProductId, i64> = HashMap::new();
        for event in &interactions {
            *counts.entry(event.product_id.clone()).or_insert(0) += 1;
        }

        let mut candidates = Vec::new();
        for product in pool {
            let count = counts.get(&product.id).copied().unwrap_or(0);
            let published_recently = product.published_at >= cutoff;
            if count == 0 && !published_recently {
                continue;
            }
            let days = product.age_days(now).clamp(1, window_days);
            let velocity = count as f64 / days as f64;
            let (browse, signals) = rank::browse_score(&product, &self.config.relevance, now);
            let score = velocity + self.config.trending_popularity_weight * browse;
            candidates.push(RankedCandidate {
                product,
                score,
                signals,
            });
        }
        sort_candidates(&mut candidates);

        Ok(StrategyOutcome {
            candidates,
            reason: Some("Trending now".to_string()),
            based_on: category.map(|c| c.as_str().to_string()),
            confidence: Some(0.6),
        })
    }

    /// Similar: same category, at least one overlapping tag. Falls back
    /// to trending within the subject's category.
    async fn similar(
        &self,
        req: &RecommendationRequest,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let subject = match &req.product_id {
            Some(id) => self.catalog.product(id).await?,
            None => None,
        };
        let Some(subject) = subject else {
            return self.trending(req.category.as_ref(), now).await;
        };

        let pool = self.catalog.products_in_category(&subject.category).await?;
        let mut candidates = Vec::new();
        for product in pool {
            if product.id == subject.id {
                continue;
            }
            let overlap = tag_overlap(&subject, &product);
            if overlap == 0 {
                continue;
            }
            // Overlap dominates; popularity (< 1) orders within a tier.
            let popularity = rank::popularity_factor(&product, &self.config.relevance);
            candidates.push(RankedCandidate {
                product,
                score: overlap as f64 + popularity,
                signals: ScoreSignals::default(),
            });
        }

        if candidates.is_empty() {
            let mut fallback = self.trending(Some(&subject.category), now).await?;
            fallback.based_on = Some(subject.name.clone());
            fallback.confidence = Some(0.4);
            return Ok(fallback);
        }
        sort_candidates(&mut candidates);

        Ok(StrategyOutcome {
            candidates,
            reason: Some(format!("Similar to {}", subject.name)),
            based_on: Some(subject.name.clone()),
            confidence: Some(0.8),
        })
    }

    /// Personalized: purchase- and browsing-history candidates blended
    /// with a heavier purchase weight. An empty history falls back to
    /// trending, yielding exactly the trending output for the same
    /// category and limit.
    async fn personalized(
        &self,
        req: &RecommendationRequest,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let Some(user) = &req.user_id else {
            return self.trending(req.category.as_ref(), now).await;
        };
        let depth = self.config.history_depth;
        let views = self.history.recent_views(user, depth).await?;
        let purchases = self.history.recent_purchases(user, depth).await?;
        if views.is_empty() && purchases.is_empty() {
            return self.trending(req.category.as_ref(), now).await;
        }

        let browse = self.candidates_from_events(&views, now).await?;
        let bought = self.candidates_from_events(&purchases, now).await?;

        let mut blended: HashMap<ProductId, RankedCandidate> = HashMap::new();
        for (weight, set) in [
            (self.config.browse_weight, browse),
            (self.config.purchase_weight, bought),
        ] {
            for mut candidate in set {
                candidate.score *= weight;
                match blended.entry(candidate.product.id.clone()) {
                    Entry::Occupied(mut e) => e.get_mut().score += candidate.score,
                    Entry::Vacant(v) => {
                        v.insert(candidate);
                    }
                }
            }
        }

        let seen: HashSet<&ProductId> = views
            .iter()
            .chain(purchases.iter())
            .map(|e| &e.product_id)
            .collect();
        let mut candidates: Vec<RankedCandidate> = blended
            .into_values()
            .filter(|c| !seen.contains(&c.product.id))
            .collect();
        if let Some(category) = &req.category {
            retain_category(&mut candidates, category);
        }
        sort_candidates(&mut candidates);

        Ok(StrategyOutcome {
            candidates,
            reason: Some("Picked for you".to_string()),
            based_on: Some("your browsing and purchase history".to_string()),
            confidence: Some(0.9),
        })
    }

    /// Skin-type: products compatible with the declared skin type. An
    /// undeclared skin type falls back to category-general trending.
    async fn skin_type(
        &self,
        req: &RecommendationRequest,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let declared = match &req.user_id {
            Some(user) => self.history.declared_skin_type(user).await?,
            None => None,
        };
        let Some(skin) = declared else {
            return self.trending(req.category.as_ref(), now).await;
        };

        let pool = self.pool(req.category.as_ref()).await?;
        let mut candidates: Vec<RankedCandidate> = pool
            .into_iter()
            .filter(|p| self.config.skin_compat.is_compatible(skin, p))
            .map(|product| {
                let (score, signals) = rank::browse_score(&product, &self.config.relevance, now);
                RankedCandidate {
                    product,
                    score,
                    signals,
                }
            })
            .collect();
        sort_candidates(&mut candidates);

        Ok(StrategyOutcome {
            candidates,
            reason: Some(format!("Suited to {} skin", skin.as_str())),
            based_on: Some(skin.as_str().to_string()),
            confidence: Some(0.75),
        })
    }

    /// Browsing-history and purchase-history surfaces: products in the
    /// categories of the user's most recent events, minus the items
    /// already seen. No history falls back to trending.
    async fn history_based(
        &self,
        req: &RecommendationRequest,
        kind: InteractionKind,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let Some(user) = &req.user_id else {
            return self.trending(req.category.as_ref(), now).await;
        };
        let depth = self.config.history_depth;
        let events = match kind {
            InteractionKind::View => self.history.recent_views(user, depth).await?,
            _ => self.history.recent_purchases(user, depth).await?,
        };
        if events.is_empty() {
            return self.trending(req.category.as_ref(), now).await;
        }

        let mut candidates = self.candidates_from_events(&events, now).await?;
        if let Some(category) = &req.category {
            retain_category(&mut candidates, category);
        }
        sort_candidates(&mut candidates);

        let (reason, based_on) = match kind {
            InteractionKind::View => ("Because you browsed", "recent views"),
            _ => ("Because you bought", "recent purchases"),
        };
        Ok(StrategyOutcome {
            candidates,
            reason: Some(reason.to_string()),
            based_on: Some(based_on.to_string()),
            confidence: Some(0.7),
        })
    }

    /// Category surface: the default browse ordering over one category.
    async fn category(
        &self,
        req: &RecommendationRequest,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let Some(category) = &req.category else {
            return self.trending(None, now).await;
        };
        let pool = self.catalog.products_in_category(category).await?;
        let query = SearchQuery {
            sort: SortMode::Relevance,
            ..Default::default()
        };
        let candidates = rank::rank(pool, &query, &self.config.relevance, now);

        Ok(StrategyOutcome {
            candidates,
            reason: Some(format!("More from {}", category.as_str())),
            based_on: Some(category.as_str().to_string()),
            confidence: Some(0.65),
        })
    }

    /// Complementary and frequently-bought-together surfaces, both built
    /// from co-purchase counts. Complementary keeps only candidates from
    /// a different category than the subject.
    async fn co_purchased(
        &self,
        req: &RecommendationRequest,
        other_category_only: bool,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let subject = match &req.product_id {
            Some(id) => self.catalog.product(id).await?,
            None => None,
        };
        let Some(subject) = subject else {
            return self.trending(req.category.as_ref(), now).await;
        };

        let pairs = self.history.co_purchases(&subject.id).await?;
        let mut candidates = Vec::new();
        for (id, count) in pairs {
            let Some(product) = self.catalog.product(&id).await? else {
                continue;
            };
            if other_category_only && product.category == subject.category {
                continue;
            }
            let popularity = rank::popularity_factor(&product, &self.config.relevance);
            candidates.push(RankedCandidate {
                product,
                score: count as f64 + popularity,
                signals: ScoreSignals::default(),
            });
        }

        if candidates.is_empty() {
            let mut fallback = self.trending(Some(&subject.category), now).await?;
            fallback.based_on = Some(subject.name.clone());
            fallback.confidence = Some(0.4);
            return Ok(fallback);
        }
        sort_candidates(&mut candidates);

        let reason = if other_category_only {
            format!("Pairs well with {}", subject.name)
        } else {
            "Frequently bought together".to_string()
        };
        Ok(StrategyOutcome {
            candidates,
            reason: Some(reason),
            based_on: Some(subject.name.clone()),
            confidence: Some(0.8),
        })
    }

    /// New arrivals: flagged or recently published, newest first.
    async fn new_arrivals(
        &self,
        category: Option<&CategoryId>,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let cutoff = now - self.config.trending_window_days * 86_400;
        let pool = self.pool(category).await?;
        let mut candidates: Vec<RankedCandidate> = pool
            .into_iter()
            .filter(|p| p.is_new || p.published_at >= cutoff)
            .map(|product| RankedCandidate {
                score: product.published_at as f64,
                product,
                signals: ScoreSignals::default(),
            })
            .collect();
        sort_candidates(&mut candidates);

        Ok(StrategyOutcome {
            candidates,
            reason: Some("New arrivals".to_string()),
            based_on: category.map(|c| c.as_str().to_string()),
            confidence: Some(0.7),
        })
    }

    /// Bestsellers: flag first, wishlist count second.
    async fn bestsellers(
        &self,
        category: Option<&CategoryId>,
        now: i64,
    ) -> Result<StrategyOutcome, RecommendError> {
        let pool = self.pool(category).await?;
        let query = SearchQuery {
            sort: SortMode::Bestseller,
            ..Default::default()
        };
        let candidates = rank::rank(pool, &query, &self.config.relevance, now);

        Ok(StrategyOutcome {
            candidates,
            reason: Some("Bestsellers".to_string()),
            based_on: category.map(|c| c.as_str().to_string()),
            confidence: Some(0.7),
        })
    }

    /// Products in the categories of the given events, excluding the
    /// event items themselves. A candidate reachable through several
    /// events keeps its best score.
    async fn candidates_from_events(
        &self,
        events: &[Interaction],
        now: i64,
    ) -> Result<Vec<RankedCandidate>, RecommendError> {
        let mut best: HashMap<ProductId, RankedCandidate> = HashMap::new();
        for event in events {
            let Some(trigger) = self.catalog.product(&event.product_id).await? else {
                continue;
            };
            let event_recency = event_recency(event.at, now, self.config.history_half_life_days);
            let pool = self.catalog.products_in_category(&trigger.category).await?;
            for product in pool {
                if events.iter().any(|e| e.product_id == product.id) {
                    continue;
                }
                let popularity = rank::popularity_factor(&product, &self.config.relevance);
                let score = 0.5 * event_recency + 0.5 * popularity;
                let better = best
                    .get(&product.id)
                    .map_or(true, |existing| score > existing.score);
                if better {
                    best.insert(
                        product.id.clone(),
                        RankedCandidate {
                            product,
                            score,
                            signals: ScoreSignals::default(),
                        },
                    );
                }
            }
        }
        Ok(best.into_values().collect())
    }
}

fn sort_candidates(candidates: &mut [RankedCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
}

fn retain_category(candidates: &mut Vec<RankedCandidate>, category: &CategoryId) {
    candidates.retain(|c| {
        &c.product.category == category || c.product.sub_category.as_ref() == Some(category)
    });
}

fn tag_overlap(a: &Product, b: &Product) -> usize {
    a.tags.iter().filter(|t| b.has_tag(t)).count()
}

/// Influence of a history event, halving every `half_life_days`.
fn event_recency(at: i64, now: i64, half_life_days: f64) -> f64 {
    let age_days = ((now - at).max(0) as f64) / 86_400.0;
    0.5_f64.powf(age_days / half_life_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use glow_catalog::{MemoryCatalog, Money, SkinType, UnavailableCatalog};

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn product(id: &str, name: &str, category: &str, tags: &[&str]) -> Product {
        let mut p = Product::new(name, "glow-lab", category, Money::krw(40_000));
        p.id = ProductId::new(id);
        p.published_at = NOW - 200 * DAY;
        p.created_at = p.published_at;
        for tag in tags {
            p.add_tag(*tag);
        }
        p
    }

    fn fixture_catalog() -> Arc<MemoryCatalog> {
        let mut vitamin = product(
            "serum-a",
            "Vitamin C Serum",
            "skincare",
            &["vitamin-c", "brightening"],
        );
        vitamin.wishlist_count = 50;

        let mut niacinamide = product(
            "serum-b",
            "Niacinamide Serum",
            "skincare",
            &["niacinamide", "brightening"],
        );
        niacinamide.wishlist_count = 80;

        let mut cream = product("cream-a", "Hydra Cream", "skincare", &["ceramide"]);
        cream.wishlist_count = 10;

        let mut tint = product("lip-a", "Velvet Lip Tint", "makeup", &[]);
        tint.is_bestseller = true;
        tint.wishlist_count = 200;

        let perfume = product("perfume-a", "Rose Eau de Parfum", "fragrance", &[]);

        Arc::new(MemoryCatalog::with_products(vec![
            vitamin,
            niacinamide,
            cream,
            tint,
            perfume,
        ]))
    }

    fn engine_with(history: MemoryHistory) -> RecommendationEngine {
        RecommendationEngine::new(fixture_catalog(), Arc::new(history))
    }

    fn ids(recs: &Recommendations) -> Vec<&str> {
        recs.products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_personalized_empty_history_equals_trending() {
        let history = MemoryHistory::new();
        history.add(Interaction::new(InteractionKind::View, "serum-b", NOW - DAY));
        let engine = engine_with(history);

        let personalized = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Personalized)
                    .with_user("u-empty")
                    .with_limit(4),
                NOW,
            )
            .await
            .unwrap();
        let trending = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Trending).with_limit(4),
                NOW,
            )
            .await
            .unwrap();

        assert_eq!(ids(&personalized), ids(&trending));
    }

    #[tokio::test]
    async fn test_exclusions_always_honored() {
        let history = MemoryHistory::new();
        history.add(Interaction::new(InteractionKind::View, "serum-a", NOW - DAY));
        history.add(Interaction::new(InteractionKind::View, "serum-b", NOW - DAY));
        let engine = engine_with(history);

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Trending)
                    .with_exclusions(vec!["serum-a".into(), "serum-b".into()]),
                NOW,
            )
            .await
            .unwrap();
        assert!(!ids(&recs).contains(&"serum-a"));
        assert!(!ids(&recs).contains(&"serum-b"));
    }

    #[tokio::test]
    async fn test_similar_prefers_tag_overlap() {
        let engine = engine_with(MemoryHistory::new());
        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Similar)
                    .with_product("serum-a")
                    .with_limit(4),
                NOW,
            )
            .await
            .unwrap();

        // serum-b shares "brightening"; cream-a shares nothing and is out.
        assert_eq!(ids(&recs), vec!["serum-b"]);
        assert!(recs.reason.as_deref().unwrap().contains("Vitamin C Serum"));
    }

    #[tokio::test]
    async fn test_similar_lone_product_falls_back_without_error() {
        let engine = engine_with(MemoryHistory::new());
        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Similar)
                    .with_product("perfume-a")
                    .with_limit(4),
                NOW,
            )
            .await
            .unwrap();

        // No tag overlap in the category; trending fallback excludes the
        // subject itself, so the result is empty rather than an error.
        assert!(recs.products.is_empty());
    }

    #[tokio::test]
    async fn test_trending_scores_velocity_not_raw_totals() {
        let history = MemoryHistory::new();
        // serum-a is 200 days old with 3 recent interactions.
        for i in 0..3 {
            history.add(Interaction::new(
                InteractionKind::View,
                "serum-a",
                NOW - i * DAY,
            ));
        }
        // cream-a: make it freshly published with 2 recent interactions.
        let catalog = fixture_catalog();
        let engine = RecommendationEngine::new(catalog.clone(), Arc::new(history));
        // Re-seed cream-a as fresh.
        let mut fresh = product("cream-b", "Dew Cream", "skincare", &[]);
        fresh.published_at = NOW - 2 * DAY;
        catalog.insert(fresh);
        engine
            .history
            .record(Interaction::new(InteractionKind::View, "cream-b", NOW))
            .await
            .unwrap();
        engine
            .history
            .record(Interaction::new(InteractionKind::View, "cream-b", NOW - DAY))
            .await
            .unwrap();

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Trending).with_limit(5),
                NOW,
            )
            .await
            .unwrap();

        // 2 events over 2 days beats 3 events over the 30-day window cap.
        let order = ids(&recs);
        let fresh_pos = order.iter().position(|id| *id == "cream-b").unwrap();
        let old_pos = order.iter().position(|id| *id == "serum-a").unwrap();
        assert!(fresh_pos < old_pos);
    }

    #[tokio::test]
    async fn test_skin_type_filters_by_compatibility() {
        let history = MemoryHistory::new();
        history.declare_skin_type("u-dry", SkinType::Dry);
        let engine = engine_with(history);

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::SkinType)
                    .with_user("u-dry")
                    .with_limit(5),
                NOW,
            )
            .await
            .unwrap();

        // Only cream-a carries a tag suited to dry skin (ceramide).
        assert_eq!(ids(&recs), vec!["cream-a"]);
        assert_eq!(recs.based_on.as_deref(), Some("dry"));
    }

    #[tokio::test]
    async fn test_skin_type_undeclared_falls_back_to_trending() {
        let history = MemoryHistory::new();
        history.add(Interaction::new(InteractionKind::View, "lip-a", NOW - DAY));
        let engine = engine_with(history);

        let skin = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::SkinType)
                    .with_user("u-unknown")
                    .with_limit(3),
                NOW,
            )
            .await
            .unwrap();
        let trending = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Trending).with_limit(3),
                NOW,
            )
            .await
            .unwrap();

        assert_eq!(ids(&skin), ids(&trending));
    }

    #[tokio::test]
    async fn test_browsing_history_excludes_viewed_items() {
        let history = MemoryHistory::new();
        history.add(Interaction::new(InteractionKind::View, "serum-a", NOW - DAY).by_user("u1"));
        let engine = engine_with(history);

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::BrowsingHistory)
                    .with_user("u1")
                    .with_limit(10),
                NOW,
            )
            .await
            .unwrap();

        let order = ids(&recs);
        assert!(!order.contains(&"serum-a"));
        assert!(order.contains(&"serum-b"));
        assert!(order.contains(&"cream-a"));
    }

    #[tokio::test]
    async fn test_frequently_bought_together_uses_counts() {
        let history = MemoryHistory::new();
        for user in ["u1", "u2", "u3"] {
            history.add(
                Interaction::new(InteractionKind::Purchase, "serum-a", NOW - DAY).by_user(user),
            );
            history.add(
                Interaction::new(InteractionKind::Purchase, "lip-a", NOW - DAY).by_user(user),
            );
        }
        history.add(
            Interaction::new(InteractionKind::Purchase, "serum-a", NOW - DAY).by_user("u4"),
        );
        history.add(
            Interaction::new(InteractionKind::Purchase, "cream-a", NOW - DAY).by_user("u4"),
        );
        let engine = engine_with(history);

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::FrequentlyBoughtTogether)
                    .with_product("serum-a")
                    .with_limit(5),
                NOW,
            )
            .await
            .unwrap();

        assert_eq!(ids(&recs), vec!["lip-a", "cream-a"]);
    }

    #[tokio::test]
    async fn test_complementary_skips_same_category() {
        let history = MemoryHistory::new();
        for user in ["u1", "u2"] {
            history.add(
                Interaction::new(InteractionKind::Purchase, "serum-a", NOW - DAY).by_user(user),
            );
            history.add(
                Interaction::new(InteractionKind::Purchase, "serum-b", NOW - DAY).by_user(user),
            );
            history.add(
                Interaction::new(InteractionKind::Purchase, "lip-a", NOW - DAY).by_user(user),
            );
        }
        let engine = engine_with(history);

        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Complementary)
                    .with_product("serum-a")
                    .with_limit(5),
                NOW,
            )
            .await
            .unwrap();

        // serum-b co-purchases more but shares the subject's category.
        assert_eq!(ids(&recs), vec!["lip-a"]);
    }

    #[tokio::test]
    async fn test_bestsellers_orders_by_flag() {
        let engine = engine_with(MemoryHistory::new());
        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Bestsellers).with_limit(2),
                NOW,
            )
            .await
            .unwrap();
        assert_eq!(recs.products[0].id.as_str(), "lip-a");
    }

    #[tokio::test]
    async fn test_new_arrivals_newest_first() {
        let catalog = fixture_catalog();
        let mut fresh = product("mask-a", "Sheet Mask", "skincare", &[]);
        fresh.published_at = NOW - DAY;
        catalog.insert(fresh);
        let mut flagged = product("mask-b", "Mud Mask", "skincare", &[]);
        flagged.is_new = true;
        catalog.insert(flagged);

        let engine = RecommendationEngine::new(catalog, Arc::new(MemoryHistory::new()));
        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::NewArrivals).with_limit(5),
                NOW,
            )
            .await
            .unwrap();

        let order = ids(&recs);
        assert_eq!(order[0], "mask-a");
        assert!(order.contains(&"mask-b"));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let engine = RecommendationEngine::new(
            Arc::new(UnavailableCatalog),
            Arc::new(MemoryHistory::new()),
        );
        let result = engine
            .recommend(&RecommendationRequest::new(RecommendationType::Trending))
            .await;
        assert!(matches!(result, Err(RecommendError::Store(_))));
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let history = MemoryHistory::new();
        for id in ["serum-a", "serum-b", "cream-a", "lip-a"] {
            history.add(Interaction::new(InteractionKind::View, id, NOW - DAY));
        }
        let engine = engine_with(history);
        let recs = engine
            .recommend_at(
                &RecommendationRequest::new(RecommendationType::Trending).with_limit(2),
                NOW,
            )
            .await
            .unwrap();
        assert_eq!(recs.products.len(), 2);
    }
}
