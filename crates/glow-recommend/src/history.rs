//! User interaction history: the signal source for personalization.

use async_trait::async_trait;
use glow_catalog::{ProductId, SkinType, StoreError, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// What a user did with a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    View,
    Purchase,
    WishlistAdd,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Purchase => "purchase",
            InteractionKind::WishlistAdd => "wishlist_add",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(InteractionKind::View),
            "purchase" => Some(InteractionKind::Purchase),
            "wishlist_add" | "wishlist-add" => Some(InteractionKind::WishlistAdd),
            _ => None,
        }
    }
}

/// A single interaction event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// The acting user; anonymous events carry none.
    pub user_id: Option<UserId>,
    /// The product acted on.
    pub product_id: ProductId,
    /// Kind of interaction.
    pub kind: InteractionKind,
    /// Unix timestamp of the event.
    pub at: i64,
}

impl Interaction {
    pub fn new(kind: InteractionKind, product_id: impl Into<ProductId>, at: i64) -> Self {
        Self {
            user_id: None,
            product_id: product_id.into(),
            kind,
            at,
        }
    }

    /// Attribute the event to a user.
    pub fn by_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Source of user history and interaction signals.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most recent views by a user, newest first.
    async fn recent_views(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<Interaction>, StoreError>;

    /// Most recent purchases by a user, newest first.
    async fn recent_purchases(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<Interaction>, StoreError>;

    /// The user's declared skin type, if any.
    async fn declared_skin_type(&self, user: &UserId) -> Result<Option<SkinType>, StoreError>;

    /// All interactions at or after the cutoff, for trending windows.
    async fn interactions_since(&self, cutoff: i64) -> Result<Vec<Interaction>, StoreError>;

    /// Products purchased together with the given product, with
    /// co-occurrence counts, highest first.
    async fn co_purchases(
        &self,
        product: &ProductId,
    ) -> Result<Vec<(ProductId, i64)>, StoreError>;

    /// Ingest one interaction event.
    async fn record(&self, interaction: Interaction) -> Result<(), StoreError>;
}

/// In-memory history for tests, demos, and seed data.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    interactions: RwLock<Vec<Interaction>>,
    skin_types: RwLock<HashMap<UserId, SkinType>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event without going through the async trait.
    pub fn add(&self, interaction: Interaction) {
        self.interactions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(interaction);
    }

    /// Declare a user's skin type.
    pub fn declare_skin_type(&self, user: impl Into<UserId>, skin: SkinType) {
        self.skin_types
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user.into(), skin);
    }

    fn recent_of_kind(&self, user: &UserId, kind: InteractionKind, limit: usize) -> Vec<Interaction> {
        let mut events: Vec<Interaction> = self
            .interactions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|i| i.kind == kind && i.user_id.as_ref() == Some(user))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.at.cmp(&a.at));
        events.truncate(limit);
        events
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn recent_views(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<Interaction>, StoreError> {
        Ok(self.recent_of_kind(user, InteractionKind::View, limit))
    }

    async fn recent_purchases(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<Interaction>, StoreError> {
        Ok(self.recent_of_kind(user, InteractionKind::Purchase, limit))
    }

    async fn declared_skin_type(&self, user: &UserId) -> Result<Option<SkinType>, StoreError> {
        Ok(self
            .skin_types
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(user)
            .copied())
    }

    async fn interactions_since(&self, cutoff: i64) -> Result<Vec<Interaction>, StoreError> {
        Ok(self
            .interactions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|i| i.at >= cutoff)
            .cloned()
            .collect())
    }

    async fn co_purchases(
        &self,
        product: &ProductId,
    ) -> Result<Vec<(ProductId, i64)>, StoreError> {
        let interactions = self.interactions.read().unwrap_or_else(|e| e.into_inner());

        // Users who purchased the subject product.
        let buyers: Vec<&UserId> = interactions
            .iter()
            .filter(|i| {
                i.kind == InteractionKind::Purchase
                    && &i.product_id == product
                    && i.user_id.is_some()
            })
            .filter_map(|i| i.user_id.as_ref())
            .collect();

        let mut counts: HashMap<ProductId, i64> = HashMap::new();
        for event in interactions.iter() {
            if event.kind != InteractionKind::Purchase || &event.product_id == product {
                continue;
            }
            let Some(user) = event.user_id.as_ref() else {
                continue;
            };
            if buyers.contains(&user) {
                *counts.entry(event.product_id.clone()).or_insert(0) += 1;
            }
        }

        let mut pairs: Vec<(ProductId, i64)> = counts.into_iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(pairs)
    }

    async fn record(&self, interaction: Interaction) -> Result<(), StoreError> {
        self.add(interaction);
        Ok(())
    }
}
