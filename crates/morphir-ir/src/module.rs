// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Modules, packages and distributions.

use serde::{Deserialize, Serialize};

use crate::fqname::FQName;
use crate::name::{Name, Path};
use crate::types::{Constructor, TypeDefinition};

// ---------------------------------------------------------------------------
// Wrappers
// ---------------------------------------------------------------------------

/// Visibility of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    Public,
    Private,
}

/// A definition together with its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessControlled<T> {
    pub access: Access,
    pub value: T,
}

impl<T> AccessControlled<T> {
    pub fn public(value: T) -> Self {
        Self {
            access: Access::Public,
            value,
        }
    }

    pub fn private(value: T) -> Self {
        Self {
            access: Access::Private,
            value,
        }
    }
}

/// A definition together with its documentation string.
#[derive(Debug, Clone, PartialEq)]
pub struct Documented<T> {
    pub doc: String,
    pub value: T,
}

impl<T> Documented<T> {
    pub fn new(doc: impl Into<String>, value: T) -> Self {
        Self {
            doc: doc.into(),
            value,
        }
    }

    pub fn undocumented(value: T) -> Self {
        Self::new("", value)
    }
}

// ---------------------------------------------------------------------------
// Module / package
// ---------------------------------------------------------------------------

pub type TypeEntry = AccessControlled<Documented<TypeDefinition<()>>>;

/// Contents of one module.
///
/// Value definitions are kept as opaque JSON: nothing here inspects them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleDefinition {
    pub types: Vec<(Name, TypeEntry)>,
    pub values: Vec<(Name, serde_json::Value)>,
    pub doc: Option<String>,
}

impl ModuleDefinition {
    pub fn type_definition(&self, name: &Name) -> Option<&TypeDefinition<()>> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| &entry.value.value)
    }

    /// Find a constructor across the module's custom types.
    ///
    /// Returns the owning type name and the constructor.
    pub fn constructor(&self, name: &Name) -> Option<(&Name, &Constructor<()>)> {
        self.types.iter().find_map(|(type_name, entry)| {
            entry
                .value
                .value
                .constructor(name)
                .map(|ctor| (type_name, ctor))
        })
    }
}

/// All modules of a package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageDefinition {
    pub modules: Vec<(Path, AccessControlled<ModuleDefinition>)>,
}

impl PackageDefinition {
    pub fn module(&self, path: &Path) -> Option<&ModuleDefinition> {
        self.modules
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, m)| &m.value)
    }
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// A distributable IR unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Library {
        package_name: Path,
        /// Dependencies are carried through untouched.
        dependencies: serde_json::Value,
        definition: PackageDefinition,
    },
}

impl Distribution {
    pub fn library(package_name: Path, definition: PackageDefinition) -> Self {
        Distribution::Library {
            package_name,
            dependencies: serde_json::Value::Array(Vec::new()),
            definition,
        }
    }

    pub fn package_name(&self) -> &Path {
        match self {
            Distribution::Library { package_name, .. } => package_name,
        }
    }

    pub fn definition(&self) -> &PackageDefinition {
        match self {
            Distribution::Library { definition, .. } => definition,
        }
    }

    pub fn module(&self, path: &Path) -> Option<&ModuleDefinition> {
        self.definition().module(path)
    }

    /// Resolve a type by FQName within this distribution's own package.
    pub fn lookup_type(&self, fqname: &FQName) -> Option<&TypeDefinition<()>> {
        if fqname.package_path() != self.package_name() {
            return None;
        }
        self.module(fqname.module_path())?
            .type_definition(fqname.local_name())
    }
}
