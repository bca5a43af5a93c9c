//! Skin-type compatibility between declared skin types and product tags.
//!
//! Products carry ingredient/attribute tags; a declared skin type maps to
//! tags that suit it and tags to avoid. The table is configuration, not
//! code: storefronts override it without touching the engines.

use crate::product::{Product, SkinType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag lists for a single skin type.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkinProfile {
    /// Tags that suit this skin type.
    pub suited: Vec<String>,
    /// Tags incompatible with this skin type.
    pub avoid: Vec<String>,
}

impl SkinProfile {
    pub fn new(suited: &[&str], avoid: &[&str]) -> Self {
        Self {
            suited: suited.iter().map(|s| s.to_string()).collect(),
            avoid: avoid.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Compatibility table keyed by skin type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinCompatibility {
    profiles: HashMap<SkinType, SkinProfile>,
}

impl Default for SkinCompatibility {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            SkinType::Dry,
            SkinProfile::new(
                &["hyaluronic-acid", "ceramide", "squalane", "shea-butter"],
                &["alcohol-denat", "clay"],
            ),
        );
        profiles.insert(
            SkinType::Oily,
            SkinProfile::new(
                &["salicylic-acid", "niacinamide", "clay", "tea-tree"],
                &["coconut-oil", "shea-butter"],
            ),
        );
        profiles.insert(
            SkinType::Combination,
            SkinProfile::new(&["niacinamide", "hyaluronic-acid", "green-tea"], &[]),
        );
        profiles.insert(
            SkinType::Sensitive,
            SkinProfile::new(
                &["centella", "panthenol", "oat", "ceramide"],
                &["fragrance", "alcohol-denat", "retinol"],
            ),
        );
        profiles.insert(SkinType::Normal, SkinProfile::default());
        Self { profiles }
    }
}

impl SkinCompatibility {
    /// An empty table: every product is compatible with every skin type.
    pub fn permissive() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Get the profile for a skin type, if configured.
    pub fn profile(&self, skin: SkinType) -> Option<&SkinProfile> {
        self.profiles.get(&skin)
    }

    /// Replace the profile for a skin type.
    pub fn set_profile(&mut self, skin: SkinType, profile: SkinProfile) {
        self.profiles.insert(skin, profile);
    }

    /// Whether a product suits the given skin type.
    ///
    /// A product is compatible when it carries no avoid-listed tag and,
    /// where the profile names suited tags, at least one of them.
    pub fn is_compatible(&self, skin: SkinType, product: &Product) -> bool {
        let Some(profile) = self.profiles.get(&skin) else {
            return true;
        };
        if profile.avoid.iter().any(|tag| product.has_tag(tag)) {
            return false;
        }
        if profile.suited.is_empty() {
            return true;
        }
        profile.suited.iter().any(|tag| product.has_tag(tag))
    }
}
