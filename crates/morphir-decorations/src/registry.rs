// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Aggregate store of decorations across kinds and nodes.

use std::collections::BTreeMap;
use std::fmt;

use morphir_ir::NodePath;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::values::{DecorationValue, DecorationValues};

// ---------------------------------------------------------------------------
// DecorationId
// ---------------------------------------------------------------------------

/// Name of a decoration kind, e.g. `"documentation"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationId(String);

impl DecorationId {
    pub fn new(id: impl Into<String>) -> Self {
        DecorationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecorationId {
    fn from(s: &str) -> Self {
        DecorationId(s.to_string())
    }
}

impl From<String> for DecorationId {
    fn from(s: String) -> Self {
        DecorationId(s)
    }
}

// ---------------------------------------------------------------------------
// DecorationRegistry
// ---------------------------------------------------------------------------

/// Node path string -> decoration kind -> value.
pub type DecorationMap = BTreeMap<String, BTreeMap<DecorationId, DecorationValue>>;

/// Immutable registry of decorations attached to a distribution.
///
/// Every edit produces a new registry with its own maps. Payloads are
/// immutable and may be shared between snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationRegistry {
    decorations: DecorationMap,
}

impl DecorationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoration(
        &self,
        node: &NodePath,
        id: &DecorationId,
        value: DecorationValue,
    ) -> Self {
        let mut decorations = self.decorations.clone();
        decorations
            .entry(node.to_string())
            .or_default()
            .insert(id.clone(), value);
        Self { decorations }
    }

    /// Remove one decoration; nodes left with no decorations are dropped.
    pub fn without_decoration(&self, node: &NodePath, id: &DecorationId) -> Self {
        let key = node.to_string();
        if !self
            .decorations
            .get(&key)
            .is_some_and(|decs| decs.contains_key(id))
        {
            return self.clone();
        }

        let mut decorations = self.decorations.clone();
        if let Some(decs) = decorations.get_mut(&key) {
            decs.remove(id);
            if decs.is_empty() {
                decorations.remove(&key);
            }
        }
        Self { decorations }
    }

    pub fn get_decoration(&self, node: &NodePath, id: &DecorationId) -> Option<DecorationValue> {
        self.decorations
            .get(&node.to_string())
            .and_then(|decs| decs.get(id))
            .cloned()
    }

    /// All decorations on one node, empty when the node has none.
    pub fn get_decorations_for_node(
        &self,
        node: &NodePath,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.decorations
            .get(&node.to_string())
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_decoration(&self, node: &NodePath, id: &DecorationId) -> bool {
        self.decorations
            .get(&node.to_string())
            .is_some_and(|decs| decs.contains_key(id))
    }

    pub fn has_any_decoration(&self, node: &NodePath) -> bool {
        self.decorations
            .get(&node.to_string())
            .is_some_and(|decs| !decs.is_empty())
    }

    /// Copy of the full nested map.
    pub fn all_decorations(&self) -> DecorationMap {
        self.decorations.clone()
    }

    /// Borrowing iteration over `(node path string, decorations)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<DecorationId, DecorationValue>)> {
        self.decorations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of (node, kind) entries.
    pub fn count(&self) -> usize {
        self.decorations.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Build a single-kind registry from a values snapshot.
    ///
    /// Keys that do not parse as node paths are skipped.
    pub fn from_values(id: &DecorationId, values: &DecorationValues) -> Self {
        let mut decorations = DecorationMap::new();
        for (key, value) in values.iter() {
            match key.parse::<NodePath>() {
                Ok(node) => {
                    decorations
                        .entry(node.to_string())
                        .or_default()
                        .insert(id.clone(), value.clone());
                }
                Err(e) => warn!(decoration = %id, key, error = %e, "skipping unparsable node path"),
            }
        }
        let registry = Self { decorations };
        debug!(decoration = %id, count = registry.count(), "built registry from values");
        registry
    }

    /// Fold registries left to right; later registries win on conflicts.
    pub fn merge<'a, I>(registries: I) -> Self
    where
        I: IntoIterator<Item = &'a DecorationRegistry>,
    {
        let mut decorations = DecorationMap::new();
        for registry in registries {
            for (key, decs) in &registry.decorations {
                let node = match key.parse::<NodePath>() {
                    Ok(node) => node,
                    Err(e) => {
                        warn!(key = %key, error = %e, "skipping unparsable node path during merge");
                        continue;
                    }
                };
                let merged = decorations.entry(node.to_string()).or_default();
                for (id, value) in decs {
                    merged.insert(id.clone(), value.clone());
                }
            }
        }
        Self { decorations }
    }
}
