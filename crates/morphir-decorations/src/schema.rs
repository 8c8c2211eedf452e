// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoration schemas and entry-point resolution.
//!
//! A schema is an ordinary IR distribution. The entry point
//! `Package:Module:localName` names the type that every value of a
//! decoration kind must conform to.

use std::fmt;
use std::fs;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use morphir_ir::{codec, Distribution, FQName, Name, Path, TypeDefinition};
use thiserror::Error;
use tracing::debug;

use crate::error::{DecorationError, Result};

// ---------------------------------------------------------------------------
// EntryPointError
// ---------------------------------------------------------------------------

/// Reasons an entry point does not resolve against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryPointError {
    #[error("entry point {0:?} must have the form 'Package:Module:localName'")]
    Malformed(String),

    #[error("package {found:?} does not match decoration IR package {expected:?}")]
    PackageMismatch { found: String, expected: String },

    #[error("module {module:?} not found in package {package:?}")]
    ModuleNotFound { package: String, module: String },

    #[error("type {name:?} not found in module {module:?}")]
    TypeNotFound { module: String, name: String },
}

// ---------------------------------------------------------------------------
// EntryPoint
// ---------------------------------------------------------------------------

/// A parsed `Package:Module:localName` designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    package: Path,
    module: Path,
    local_name: Name,
}

impl EntryPoint {
    /// Split into exactly three non-empty segments.
    pub fn parse(entry_point: &str) -> std::result::Result<Self, EntryPointError> {
        let parts: Vec<&str> = entry_point.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(EntryPointError::Malformed(entry_point.to_string()));
        }
        Ok(Self {
            package: Path::parse(parts[0]),
            module: Path::parse(parts[1]),
            local_name: Name::parse(parts[2]),
        })
    }

    pub fn package(&self) -> &Path {
        &self.package
    }

    pub fn module(&self) -> &Path {
        &self.module
    }

    pub fn local_name(&self) -> &Name {
        &self.local_name
    }

    pub fn to_fqname(&self) -> FQName {
        FQName::new(
            self.package.clone(),
            self.module.clone(),
            self.local_name.clone(),
        )
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fqname())
    }
}

// ---------------------------------------------------------------------------
// DecorationIr
// ---------------------------------------------------------------------------

/// A loaded schema distribution and the file it came from.
///
/// Cheap to clone; the distribution is shared read-only.
#[derive(Debug, Clone)]
pub struct DecorationIr {
    distribution: Arc<Distribution>,
    path: PathBuf,
}

impl DecorationIr {
    pub fn new(distribution: Distribution, path: impl Into<PathBuf>) -> Self {
        Self {
            distribution: Arc::new(distribution),
            path: path.into(),
        }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    pub fn package_name(&self) -> &Path {
        self.distribution.package_name()
    }
}

/// Read and decode a schema file.
pub fn load_decoration_ir(path: &FsPath) -> Result<DecorationIr> {
    if !path.exists() {
        return Err(DecorationError::IrNotFound(path.to_path_buf()));
    }

    let data = fs::read(path).map_err(|source| DecorationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let distribution =
        codec::decode_distribution_file_payload(&data).map_err(|source| DecorationError::DecodeIr {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        package = %distribution.package_name(),
        "loaded decoration IR"
    );
    Ok(DecorationIr::new(distribution, path))
}

// ---------------------------------------------------------------------------
// Entry-point validation
// ---------------------------------------------------------------------------

/// Check that `entry_point` names a type defined in the schema's own package.
pub fn validate_entry_point(
    dec_ir: &DecorationIr,
    entry_point: &str,
) -> std::result::Result<EntryPoint, EntryPointError> {
    resolve(dec_ir, entry_point).map(|(ep, _)| ep)
}

/// Resolve the entry point and return the type definition it names.
pub fn extract_decoration_type<'a>(
    dec_ir: &'a DecorationIr,
    entry_point: &str,
) -> std::result::Result<&'a TypeDefinition<()>, EntryPointError> {
    resolve(dec_ir, entry_point).map(|(_, def)| def)
}

fn resolve<'a>(
    dec_ir: &'a DecorationIr,
    entry_point: &str,
) -> std::result::Result<(EntryPoint, &'a TypeDefinition<()>), EntryPointError> {
    let ep = EntryPoint::parse(entry_point)?;

    let package = dec_ir.package_name();
    if ep.package() != package {
        return Err(EntryPointError::PackageMismatch {
            found: ep.package().to_string(),
            expected: package.to_string(),
        });
    }

    let module = dec_ir
        .distribution()
        .module(ep.module())
        .ok_or_else(|| EntryPointError::ModuleNotFound {
            package: package.to_string(),
            module: ep.module().to_string(),
        })?;

    let def = module
        .type_definition(ep.local_name())
        .ok_or_else(|| EntryPointError::TypeNotFound {
            module: ep.module().to_string(),
            name: ep.local_name().to_camel_case(),
        })?;

    Ok((ep, def))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{shape_schema, write_schema};
    use tempfile::tempdir;

    #[test]
    fn test_valid_entry_point() {
        let ir = shape_schema();
        let ep = validate_entry_point(&ir, "My.Decoration:Foo:shape").unwrap();
        assert_eq!(ep.to_string(), "My.Decoration:Foo:shape");
        assert!(matches!(
            extract_decoration_type(&ir, "My.Decoration:Foo:shape").unwrap(),
            TypeDefinition::TypeAlias { .. }
        ));
    }

    #[test]
    fn test_entry_point_segment_count() {
        let ir = shape_schema();
        for bad in ["My.Decoration:Foo", "My.Decoration:Foo:shape:extra", "", "::", "A::b"] {
            assert!(
                matches!(validate_entry_point(&ir, bad), Err(EntryPointError::Malformed(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_entry_point_resolution_failures() {
        let ir = shape_schema();
        assert!(matches!(
            validate_entry_point(&ir, "Other.Package:Foo:shape"),
            Err(EntryPointError::PackageMismatch { .. })
        ));
        assert!(matches!(
            validate_entry_point(&ir, "My.Decoration:Missing:shape"),
            Err(EntryPointError::ModuleNotFound { .. })
        ));
        assert!(matches!(
            validate_entry_point(&ir, "My.Decoration:Foo:missing"),
            Err(EntryPointError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_load_decoration_ir() {
        let dir = tempdir().unwrap();
        let path = write_schema(dir.path(), &shape_schema());
        let ir = load_decoration_ir(&path).unwrap();
        assert_eq!(ir.package_name().to_string(), "My.Decoration");
        assert_eq!(ir.path(), path.as_path());
    }

    #[test]
    fn test_load_decoration_ir_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_decoration_ir(&dir.path().join("absent.json")),
            Err(DecorationError::IrNotFound(_))
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        assert!(matches!(
            load_decoration_ir(&bad),
            Err(DecorationError::DecodeIr { .. })
        ));
    }
}
