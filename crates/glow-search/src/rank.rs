//! Ranking of the filtered candidate set.
//!
//! Every sort mode yields a total order: candidates are scored, then
//! sorted by score descending with ties broken by product id ascending,
//! so the same query against an unchanged catalog always produces the
//! same ordering. For ascending modes the key is negated. Relevance mode
//! additionally records the per-signal breakdown for explainability.

use crate::config::RelevanceConfig;
use crate::query::{SearchQuery, SortMode};
use glow_catalog::Product;
use serde::{Deserialize, Serialize};

/// Contributing signals of a relevance score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ScoreSignals {
    /// Text-match strength.
    pub text: f64,
    /// Recency decay of the publish timestamp.
    pub recency: f64,
    /// Wishlist and review popularity.
    pub popularity: f64,
}

/// A product with its ordering score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub product: Product,
    /// Descending ordering key for the requested sort mode.
    pub score: f64,
    /// Signal breakdown; populated in relevance mode only.
    pub signals: ScoreSignals,
}

/// Totally order the candidate set for a sort mode.
pub fn rank(
    candidates: Vec<Product>,
    query: &SearchQuery,
    config: &RelevanceConfig,
    now: i64,
) -> Vec<RankedCandidate> {
    let tokens = query.tokens();
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|product| {
            let (score, signals) = match query.sort {
                SortMode::Relevance => relevance_score(&product, &query.term, &tokens, config, now),
                SortMode::PriceAsc => (
                    -(product.price.amount_minor as f64),
                    ScoreSignals::default(),
                ),
                SortMode::PriceDesc => (product.price.amount_minor as f64, ScoreSignals::default()),
                SortMode::Newest => (product.created_at as f64, ScoreSignals::default()),
                SortMode::Rating => (rating_key(&product), ScoreSignals::default()),
                SortMode::Bestseller => (bestseller_key(&product), ScoreSignals::default()),
            };
            RankedCandidate {
                product,
                score,
                signals,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.product.id.cmp(&b.product.id))
    });
    ranked
}

/// Relevance score: weighted sum of text strength, recency, popularity.
pub fn relevance_score(
    product: &Product,
    term: &str,
    tokens: &[&str],
    config: &RelevanceConfig,
    now: i64,
) -> (f64, ScoreSignals) {
    let signals = ScoreSignals {
        text: text_strength(product, term, tokens),
        recency: recency_factor(product.published_at, now, config),
        popularity: popularity_factor(product, config),
    };
    let score = config.text_weight * signals.text
        + config.recency_weight * signals.recency
        + config.popularity_weight * signals.popularity;
    (score, signals)
}

/// Browse ordering: the relevance formula with no text term, used when a
/// result list is ranked without a query (category pages, recommenders).
pub fn browse_score(
    product: &Product,
    config: &RelevanceConfig,
    now: i64,
) -> (f64, ScoreSignals) {
    relevance_score(product, "", &[], config, now)
}

/// Text-match strength against a candidate already known to match.
///
/// Exact full-term match in the name scores highest, then the term as a
/// name substring, then all tokens somewhere in the name; a candidate
/// that only matched via description or brand scores lowest.
fn text_strength(product: &Product, term: &str, tokens: &[&str]) -> f64 {
    if term.is_empty() {
        return 0.0;
    }
    let name = product.name.to_lowercase();
    if name == term {
        1.0
    } else if name.contains(term) {
        0.7
    } else if tokens.iter().all(|t| name.contains(t)) {
        0.5
    } else {
        0.25
    }
}

/// Bounded recency decay: halves every `recency_half_life_days`, never
/// drops below the floor.
pub fn recency_factor(published_at: i64, now: i64, config: &RelevanceConfig) -> f64 {
    let age_days = ((now - published_at).max(0) as f64) / 86_400.0;
    let decay = 0.5_f64.powf(age_days / config.recency_half_life_days);
    config.recency_floor + (1.0 - config.recency_floor) * decay
}

/// Popularity in [0, 1): saturating wishlist count averaged with the
/// saturating volume-weighted rating.
pub fn popularity_factor(product: &Product, config: &RelevanceConfig) -> f64 {
    let wishlist = product.wishlist_count.max(0) as f64;
    let wishlist_signal = wishlist / (wishlist + config.wishlist_midpoint);
    let weighted = product.rating.weighted().max(0.0);
    let rating_signal = weighted / (weighted + config.rating_midpoint);
    (wishlist_signal + rating_signal) / 2.0
}

/// Rated products order by average; unrated products sort after all of
/// them regardless of average.
fn rating_key(product: &Product) -> f64 {
    if product.rating.is_rated() {
        product.rating.average
    } else {
        -1.0
    }
}

fn bestseller_key(product: &Product) -> f64 {
    let flag = if product.is_bestseller { 1e12 } else { 0.0 };
    flag + product.wishlist_count.max(0) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_catalog::{Money, ProductId, Rating};

    const NOW: i64 = 1_700_000_000;

    fn product(id: &str, name: &str, price: i64) -> Product {
        let mut p = Product::new(name, "glow-lab", "skincare", Money::krw(price));
        p.id = ProductId::new(id);
        p.published_at = NOW;
        p.created_at = NOW;
        p
    }

    fn query(term: &str, sort: SortMode) -> SearchQuery {
        SearchQuery {
            term: term.to_lowercase(),
            raw_term: term.to_string(),
            sort,
            ..Default::default()
        }
    }

    #[test]
    fn test_price_asc_scenario() {
        let mut vitamin = product("p1", "Vitamin C Serum", 68_000);
        vitamin.is_new = true;
        let retinol = product("p2", "Retinol Serum", 85_000);

        let ranked = rank(
            vec![retinol, vitamin],
            &query("serum", SortMode::PriceAsc),
            &RelevanceConfig::default(),
            NOW,
        );
        let names: Vec<&str> = ranked.iter().map(|c| c.product.name.as_str()).collect();
        assert_eq!(names, vec!["Vitamin C Serum", "Retinol Serum"]);
    }

    #[test]
    fn test_ties_break_by_id_ascending() {
        let a = product("b", "Toner", 30_000);
        let b = product("a", "Toner", 30_000);
        let c = product("c", "Toner", 30_000);

        let ranked = rank(
            vec![a, b, c],
            &query("", SortMode::PriceAsc),
            &RelevanceConfig::default(),
            NOW,
        );
        let ids: Vec<&str> = ranked.iter().map(|c| c.product.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let products: Vec<Product> = (0..20)
            .map(|i| {
                let mut p = product(&format!("p{i}"), "Glow Serum", 10_000 + i);
                p.wishlist_count = i;
                p
            })
            .collect();
        let q = query("glow serum", SortMode::Relevance);
        let config = RelevanceConfig::default();

        let first = rank(products.clone(), &q, &config, NOW);
        let second = rank(products, &q, &config, NOW);
        let order = |r: &[RankedCandidate]| {
            r.iter()
                .map(|c| c.product.id.as_str().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_unrated_sorts_after_rated() {
        let mut low = product("low", "Ampoule A", 10_000);
        low.rating = Rating::new(1.5, 4);
        let unrated = product("new", "Ampoule B", 10_000);

        let ranked = rank(
            vec![unrated, low],
            &query("", SortMode::Rating),
            &RelevanceConfig::default(),
            NOW,
        );
        assert_eq!(ranked[0].product.id.as_str(), "low");
        assert_eq!(ranked[1].product.id.as_str(), "new");
    }

    #[test]
    fn test_bestseller_flag_beats_wishlist() {
        let mut flagged = product("flag", "Cream A", 10_000);
        flagged.is_bestseller = true;
        flagged.wishlist_count = 3;
        let mut wished = product("wish", "Cream B", 10_000);
        wished.wishlist_count = 5_000;

        let ranked = rank(
            vec![wished, flagged],
            &query("", SortMode::Bestseller),
            &RelevanceConfig::default(),
            NOW,
        );
        assert_eq!(ranked[0].product.id.as_str(), "flag");
    }

    #[test]
    fn test_text_strength_tiers() {
        let exact = product("e", "Serum", 1);
        let phrase = product("p", "Glow Serum Deluxe", 1);
        let mut desc_only = product("d", "Night Ampoule", 1);
        desc_only.description = Some("a serum for nighttime".to_string());

        let q = query("serum", SortMode::Relevance);
        let config = RelevanceConfig::default();
        let ranked = rank(vec![desc_only, phrase, exact], &q, &config, NOW);
        let ids: Vec<&str> = ranked.iter().map(|c| c.product.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "p", "d"]);
        assert!(ranked[0].signals.text > ranked[1].signals.text);
        assert!(ranked[1].signals.text > ranked[2].signals.text);
    }

    #[test]
    fn test_empty_term_zeroes_text_signal() {
        let p = product("p", "Serum", 1);
        let ranked = rank(
            vec![p],
            &query("", SortMode::Relevance),
            &RelevanceConfig::default(),
            NOW,
        );
        assert_eq!(ranked[0].signals.text, 0.0);
        assert!(ranked[0].score > 0.0);
    }

    #[test]
    fn test_recency_floor_bounds_old_products() {
        let config = RelevanceConfig::default();
        let ancient = recency_factor(NOW - 40 * 365 * 86_400, NOW, &config);
        assert!(ancient >= config.recency_floor);
        let fresh = recency_factor(NOW, NOW, &config);
        assert!(fresh > ancient);
        assert!((fresh - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_popularity_volume_beats_single_review() {
        let config = RelevanceConfig::default();
        let mut single = product("s", "A", 1);
        single.rating = Rating::new(5.0, 1);
        let mut many = product("m", "B", 1);
        many.rating = Rating::new(4.0, 400);
        assert!(popularity_factor(&many, &config) > popularity_factor(&single, &config));
    }
}
