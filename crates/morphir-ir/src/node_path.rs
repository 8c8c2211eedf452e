// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Addressing of IR nodes.
//!
//! A [`NodePath`] identifies a module, a type or value, or a node nested
//! beneath one. Two paths address the same node iff their canonical strings
//! are equal.
//!
//! ```text
//! My.Package:Foo              module
//! My.Package:Foo:bar          type or value
//! My.Package:Foo:bar:field    nested node
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::fqname::{FQName, QualifiedModuleName};
use crate::name::{Name, Path};

/// Errors raised while parsing names and node paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodePathError {
    #[error("expected at least 'PackageName:ModuleName', got {0:?}")]
    TooFewSegments(String),

    #[error("expected 'PackagePath:ModulePath:localName', got {0:?}")]
    InvalidFqName(String),

    #[error("cannot convert {0:?} to a fully-qualified name")]
    NotAnFqName(String),

    #[error("cannot convert {0:?} to a qualified module name")]
    NotAModule(String),
}

/// Canonical address of an IR node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath {
    package_path: Path,
    module_path: Path,
    local_name: Option<Name>,
    segments: Vec<Name>,
}

impl NodePath {
    pub fn new(
        package_path: Path,
        module_path: Path,
        local_name: Option<Name>,
        segments: Vec<Name>,
    ) -> Self {
        Self {
            package_path,
            module_path,
            local_name,
            segments,
        }
    }

    /// Path of a type or value.
    pub fn from_fqname(fqname: &FQName) -> Self {
        Self::new(
            fqname.package_path().clone(),
            fqname.module_path().clone(),
            Some(fqname.local_name().clone()),
            Vec::new(),
        )
    }

    /// Path of a module.
    pub fn from_qualified_module_name(qname: &QualifiedModuleName) -> Self {
        Self::new(
            qname.package_path().clone(),
            qname.module_path().clone(),
            None,
            Vec::new(),
        )
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// `None` for module-level paths.
    pub fn local_name(&self) -> Option<&Name> {
        self.local_name.as_ref()
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    pub fn is_module(&self) -> bool {
        self.local_name.is_none()
    }

    pub fn to_fqname(&self) -> Result<FQName, NodePathError> {
        match &self.local_name {
            Some(local) if self.segments.is_empty() => Ok(FQName::new(
                self.package_path.clone(),
                self.module_path.clone(),
                local.clone(),
            )),
            _ => Err(NodePathError::NotAnFqName(self.to_string())),
        }
    }

    pub fn to_qualified_module_name(&self) -> Result<QualifiedModuleName, NodePathError> {
        if self.local_name.is_some() || !self.segments.is_empty() {
            return Err(NodePathError::NotAModule(self.to_string()));
        }
        Ok(QualifiedModuleName::new(
            self.package_path.clone(),
            self.module_path.clone(),
        ))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package_path, self.module_path)?;
        if let Some(local) = &self.local_name {
            write!(f, ":{}", local.to_camel_case())?;
        }
        for seg in &self.segments {
            write!(f, ":{}", seg.to_camel_case())?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = NodePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 {
            return Err(NodePathError::TooFewSegments(s.to_string()));
        }

        let package_path = Path::parse(parts[0]);
        let module_path = Path::parse(parts[1]);
        let local_name = parts.get(2).map(|p| Name::parse(p));
        let segments = parts.iter().skip(3).map(|p| Name::parse(p)).collect();

        Ok(Self::new(package_path, module_path, local_name, segments))
    }
}

impl From<&FQName> for NodePath {
    fn from(fqname: &FQName) -> Self {
        Self::from_fqname(fqname)
    }
}

impl From<&QualifiedModuleName> for NodePath {
    fn from(qname: &QualifiedModuleName) -> Self {
        Self::from_qualified_module_name(qname)
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
