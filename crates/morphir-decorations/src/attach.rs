// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attaching decoration registries to distributions.

use std::collections::BTreeMap;
use std::sync::Arc;

use morphir_ir::{Distribution, NodePath};
use tracing::{debug, info};

use crate::config::ProjectDecorations;
use crate::error::{DecorationError, Result};
use crate::registry::{DecorationId, DecorationRegistry};
use crate::schema::load_decoration_ir;
use crate::storage::load_decoration_values;
use crate::validate::validate_decoration_values;
use crate::values::DecorationValue;

/// A distribution paired with the decorations attached to it.
///
/// The distribution is shared read-only; swapping the registry produces a
/// new value.
#[derive(Debug, Clone)]
pub struct AttachedDistribution {
    distribution: Arc<Distribution>,
    registry: DecorationRegistry,
}

impl AttachedDistribution {
    pub fn new(distribution: impl Into<Arc<Distribution>>, registry: DecorationRegistry) -> Self {
        Self {
            distribution: distribution.into(),
            registry,
        }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn registry(&self) -> &DecorationRegistry {
        &self.registry
    }

    pub fn with_registry(&self, registry: DecorationRegistry) -> Self {
        Self {
            distribution: Arc::clone(&self.distribution),
            registry,
        }
    }

    pub fn get_decoration_for_node(
        &self,
        node: &NodePath,
        id: &DecorationId,
    ) -> Option<DecorationValue> {
        self.registry.get_decoration(node, id)
    }

    pub fn get_decorations_for_node(
        &self,
        node: &NodePath,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.registry.get_decorations_for_node(node)
    }

    pub fn has_decoration(&self, node: &NodePath, id: &DecorationId) -> bool {
        self.registry.has_decoration(node, id)
    }

    pub fn has_any_decoration(&self, node: &NodePath) -> bool {
        self.registry.has_any_decoration(node)
    }
}

/// Load every configured decoration kind and attach it to `distribution`.
///
/// Kinds are processed in id order. With `validate`, each kind's schema is
/// loaded and its values checked; the first failing kind aborts the load.
pub fn load_and_attach_decorations(
    distribution: impl Into<Arc<Distribution>>,
    project: &ProjectDecorations,
    validate: bool,
) -> Result<AttachedDistribution> {
    project.validate()?;
    let mut registry = DecorationRegistry::new();

    for (id, config) in project.iter() {
        let in_decoration = |source: DecorationError| DecorationError::InDecoration {
            id: id.to_string(),
            source: Box::new(source),
        };

        let values = load_decoration_values(&config.storage_location).map_err(in_decoration)?;

        if validate {
            let dec_ir = load_decoration_ir(&config.ir).map_err(in_decoration)?;
            let result = validate_decoration_values(&dec_ir, &config.entry_point, &values);
            if !result.valid {
                return Err(DecorationError::ValidationFailed {
                    id: id.to_string(),
                    count: result.error_count(),
                    errors: result.errors,
                });
            }
        }

        let kind = DecorationRegistry::from_values(id, &values);
        debug!(decoration = %id, count = kind.count(), "folding decoration values");
        registry = DecorationRegistry::merge([&registry, &kind]);
    }

    info!(
        kinds = project.len(),
        decorations = registry.count(),
        validated = validate,
        "attached decorations"
    );
    Ok(AttachedDistribution::new(distribution, registry))
}
