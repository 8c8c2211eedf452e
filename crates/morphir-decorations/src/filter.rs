// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Filtering, discovery and statistics over attached decorations.

use std::collections::{BTreeMap, BTreeSet};

use morphir_ir::NodePath;
use serde::Serialize;
use tracing::warn;

use crate::attach::AttachedDistribution;
use crate::registry::DecorationId;
use crate::values::DecorationValue;

/// Allow-list of decoration kinds. Empty means "everything".
#[derive(Debug, Clone, Default)]
pub struct DecorationFilter {
    allowed: BTreeSet<DecorationId>,
}

impl DecorationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DecorationId>,
    {
        Self {
            allowed: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, id: &DecorationId) -> bool {
        self.allowed.is_empty() || self.allowed.contains(id)
    }
}

/// Summary counts over an attached distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecorationStats {
    pub total_decorations: usize,
    pub decorated_nodes: usize,
    /// Entries per decoration kind.
    pub by_kind: BTreeMap<String, usize>,
}

impl AttachedDistribution {
    /// Decorations on `node` whose kind passes `filter`.
    pub fn filter_decorations_for_node(
        &self,
        node: &NodePath,
        filter: &DecorationFilter,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.get_decorations_for_node(node)
            .into_iter()
            .filter(|(id, _)| filter.matches(id))
            .collect()
    }

    /// Every node carrying at least one decoration, in canonical order.
    pub fn all_nodes_with_decorations(&self) -> Vec<NodePath> {
        self.registry()
            .iter()
            .filter_map(|(key, _)| parse_key(key))
            .collect()
    }

    /// Every node carrying a decoration of kind `id`.
    pub fn all_nodes_with_decoration(&self, id: &DecorationId) -> Vec<NodePath> {
        self.registry()
            .iter()
            .filter(|(_, decs)| decs.contains_key(id))
            .filter_map(|(key, _)| parse_key(key))
            .collect()
    }

    pub fn count_decorations(&self) -> usize {
        self.registry().count()
    }

    pub fn count_decorations_for_node(&self, node: &NodePath) -> usize {
        self.get_decorations_for_node(node).len()
    }

    /// Distinct decoration kinds present, sorted.
    pub fn list_decoration_ids(&self) -> Vec<DecorationId> {
        self.registry()
            .iter()
            .flat_map(|(_, decs)| decs.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Node path string -> value for one decoration kind.
    pub fn get_decorations_by_id(&self, id: &DecorationId) -> BTreeMap<String, DecorationValue> {
        self.registry()
            .iter()
            .filter_map(|(key, decs)| decs.get(id).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    pub fn stats(&self) -> DecorationStats {
        let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
        let mut decorated_nodes = 0;
        for (_, decs) in self.registry().iter() {
            if !decs.is_empty() {
                decorated_nodes += 1;
            }
            for id in decs.keys() {
                *by_kind.entry(id.to_string()).or_default() += 1;
            }
        }
        DecorationStats {
            total_decorations: self.count_decorations(),
            decorated_nodes,
            by_kind,
        }
    }
}

fn parse_key(key: &str) -> Option<NodePath> {
    match key.parse() {
        Ok(node) => Some(node),
        Err(e) => {
            warn!(key, error = %e, "skipping unparsable node path");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DecorationRegistry;
    use crate::test_support::shape_schema;

    fn node(s: &str) -> NodePath {
        s.parse().unwrap()
    }

    fn val(s: &str) -> DecorationValue {
        DecorationValue::from_json_str(s).unwrap()
    }

    fn attached() -> AttachedDistribution {
        let doc = DecorationId::from("doc");
        let tag = DecorationId::from("tag");
        let registry = DecorationRegistry::new()
            .with_decoration(&node("My.Package:Foo:bar"), &doc, val("1"))
            .with_decoration(&node("My.Package:Foo:bar"), &tag, val("2"))
            .with_decoration(&node("My.Package:Foo:baz"), &doc, val("3"))
            .with_decoration(&node("My.Package:Foo"), &tag, val("4"));
        AttachedDistribution::new(shape_schema().distribution().clone(), registry)
    }

    #[test]
    fn test_filter_empty_allows_all() {
        let a = attached();
        let all = a.filter_decorations_for_node(&node("My.Package:Foo:bar"), &DecorationFilter::all());
        assert_eq!(all.len(), 2);
        let only = a.filter_decorations_for_node(
            &node("My.Package:Foo:bar"),
            &DecorationFilter::only(["tag"]),
        );
        assert_eq!(only.len(), 1);
        assert!(only.contains_key(&DecorationId::from("tag")));
        let none = a.filter_decorations_for_node(
            &node("My.Package:Foo:bar"),
            &DecorationFilter::only(["missing"]),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_discovery_helpers() {
        let a = attached();
        assert_eq!(a.all_nodes_with_decorations().len(), 3);
        assert_eq!(a.all_nodes_with_decoration(&DecorationId::from("doc")).len(), 2);
        assert_eq!(
            a.list_decoration_ids(),
            vec![DecorationId::from("doc"), DecorationId::from("tag")]
        );
        assert_eq!(a.count_decorations(), 4);
        assert_eq!(a.count_decorations_for_node(&node("My.Package:Foo:bar")), 2);
        assert_eq!(a.count_decorations_for_node(&node("My.Package:Foo:qux")), 0);

        let docs = a.get_decorations_by_id(&DecorationId::from("doc"));
        assert_eq!(docs.len(), 2);
        assert_eq!(docs["My.Package:Foo:baz"], val("3"));
    }

    #[test]
    fn test_stats() {
        let stats = attached().stats();
        assert_eq!(stats.total_decorations, 4);
        assert_eq!(stats.decorated_nodes, 3);
        assert_eq!(stats.by_kind["doc"], 2);
        assert_eq!(stats.by_kind["tag"], 2);
    }
}
