// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fully-qualified names and qualified module names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::name::{Name, Path};
use crate::node_path::NodePathError;

/// Fully-qualified name of a type, value or constructor.
///
/// Canonical string: `Package.Path:Module.Path:localName`.
/// JSON form: `[packagePath, modulePath, localName]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FQName(pub Path, pub Path, pub Name);

impl FQName {
    pub fn new(package_path: Path, module_path: Path, local_name: Name) -> Self {
        FQName(package_path, module_path, local_name)
    }

    /// Build from string parts, e.g. `("Morphir.SDK", "Basics", "int")`.
    pub fn from_strs(package: &str, module: &str, local: &str) -> Self {
        FQName(Path::parse(package), Path::parse(module), Name::parse(local))
    }

    /// Parse the canonical `Package:Module:localName` form.
    pub fn parse(s: &str) -> Result<Self, NodePathError> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(NodePathError::InvalidFqName(s.to_string()));
        }
        Ok(Self::from_strs(parts[0], parts[1], parts[2]))
    }

    pub fn package_path(&self) -> &Path {
        &self.0
    }

    pub fn module_path(&self) -> &Path {
        &self.1
    }

    pub fn local_name(&self) -> &Name {
        &self.2
    }
}

impl fmt::Display for FQName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0, self.1, self.2.to_camel_case())
    }
}

/// A module identified by its package and module paths.
///
/// Canonical string: `Package.Path:Module.Path`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedModuleName(pub Path, pub Path);

impl QualifiedModuleName {
    pub fn new(package_path: Path, module_path: Path) -> Self {
        QualifiedModuleName(package_path, module_path)
    }

    pub fn from_strs(package: &str, module: &str) -> Self {
        QualifiedModuleName(Path::parse(package), Path::parse(module))
    }

    pub fn package_path(&self) -> &Path {
        &self.0
    }

    pub fn module_path(&self) -> &Path {
        &self.1
    }
}

impl fmt::Display for QualifiedModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}
