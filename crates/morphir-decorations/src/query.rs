// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoration lookups keyed by type, value and module names.

use std::collections::BTreeMap;

use morphir_ir::{FQName, NodePath, QualifiedModuleName};

use crate::attach::AttachedDistribution;
use crate::registry::DecorationId;
use crate::values::DecorationValue;

impl AttachedDistribution {
    pub fn get_decoration_for_type(
        &self,
        type_name: &FQName,
        id: &DecorationId,
    ) -> Option<DecorationValue> {
        self.get_decoration_for_node(&NodePath::from_fqname(type_name), id)
    }

    pub fn get_decorations_for_type(
        &self,
        type_name: &FQName,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.get_decorations_for_node(&NodePath::from_fqname(type_name))
    }

    pub fn get_decoration_for_value(
        &self,
        value_name: &FQName,
        id: &DecorationId,
    ) -> Option<DecorationValue> {
        self.get_decoration_for_node(&NodePath::from_fqname(value_name), id)
    }

    pub fn get_decorations_for_value(
        &self,
        value_name: &FQName,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.get_decorations_for_node(&NodePath::from_fqname(value_name))
    }

    pub fn get_decoration_for_module(
        &self,
        module: &QualifiedModuleName,
        id: &DecorationId,
    ) -> Option<DecorationValue> {
        self.get_decoration_for_node(&NodePath::from_qualified_module_name(module), id)
    }

    pub fn get_decorations_for_module(
        &self,
        module: &QualifiedModuleName,
    ) -> BTreeMap<DecorationId, DecorationValue> {
        self.get_decorations_for_node(&NodePath::from_qualified_module_name(module))
    }

    pub fn has_decoration_for_type(&self, type_name: &FQName, id: &DecorationId) -> bool {
        self.has_decoration(&NodePath::from_fqname(type_name), id)
    }

    pub fn has_decoration_for_value(&self, value_name: &FQName, id: &DecorationId) -> bool {
        self.has_decoration(&NodePath::from_fqname(value_name), id)
    }

    pub fn has_decoration_for_module(&self, module: &QualifiedModuleName, id: &DecorationId) -> bool {
        self.has_decoration(&NodePath::from_qualified_module_name(module), id)
    }

    pub fn has_any_decoration_for_type(&self, type_name: &FQName) -> bool {
        self.has_any_decoration(&NodePath::from_fqname(type_name))
    }

    pub fn has_any_decoration_for_value(&self, value_name: &FQName) -> bool {
        self.has_any_decoration(&NodePath::from_fqname(value_name))
    }

    pub fn has_any_decoration_for_module(&self, module: &QualifiedModuleName) -> bool {
        self.has_any_decoration(&NodePath::from_qualified_module_name(module))
    }
}
