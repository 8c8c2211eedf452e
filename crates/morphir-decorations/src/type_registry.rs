// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Catalog of reusable decoration types.
//!
//! A decoration type is a named pointer to a schema file and entry point.
//! Catalogs live in three scopes, highest precedence first:
//!
//! | Scope | File |
//! |-------|------|
//! | workspace | `<workspace>/.morphir/decorations/registry.json` |
//! | global | `~/.morphir/decorations/registry.json` |
//! | system | `/etc/morphir/decorations/registry.json` |
//!
//! Unlike [`DecorationRegistry`](crate::DecorationRegistry) this is plain
//! mutable state owned by one caller; it is not synchronized.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DecorationError, Result};
use crate::schema::{load_decoration_ir, validate_entry_point};

/// Version written to registry files.
pub const REGISTRY_FILE_VERSION: &str = "1.0";

// ---------------------------------------------------------------------------
// RegistrySource
// ---------------------------------------------------------------------------

/// Scope a decoration type was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    Workspace,
    Global,
    System,
}

impl RegistrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrySource::Workspace => "workspace",
            RegistrySource::Global => "global",
            RegistrySource::System => "system",
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrySource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "workspace" => Ok(RegistrySource::Workspace),
            "global" => Ok(RegistrySource::Global),
            "system" => Ok(RegistrySource::System),
            other => Err(format!(
                "unknown registry source {other:?} (expected workspace, global or system)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// DecorationType
// ---------------------------------------------------------------------------

/// A registered decoration type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationType {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub ir_path: PathBuf,
    pub entry_point: String,
    pub source: RegistrySource,
    pub registered_at: DateTime<Utc>,
}

impl DecorationType {
    /// New entry stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        ir_path: impl Into<PathBuf>,
        entry_point: impl Into<String>,
        source: RegistrySource,
    ) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            description: String::new(),
            ir_path: ir_path.into(),
            entry_point: entry_point.into(),
            source,
            registered_at: Utc::now(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Check that the schema file exists, loads, and contains the entry point.
pub fn validate_decoration_type(dec_type: &DecorationType) -> Result<()> {
    if !dec_type.ir_path.exists() {
        return Err(DecorationError::IrNotFound(dec_type.ir_path.clone()));
    }
    let dec_ir = load_decoration_ir(&dec_type.ir_path)?;
    validate_entry_point(&dec_ir, &dec_type.entry_point)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// TypeRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct TypeRegistryFile {
    version: String,
    #[serde(default)]
    types: BTreeMap<String, DecorationType>,
}

/// Mutable map of decoration types keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeMap<String, DecorationType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by id.
    pub fn register(&mut self, dec_type: DecorationType) {
        self.types.insert(dec_type.id.clone(), dec_type);
    }

    pub fn get(&self, id: &str) -> Option<&DecorationType> {
        self.types.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Returns whether an entry was removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.types.remove(id).is_some()
    }

    /// All entries, sorted by id.
    pub fn list(&self) -> Vec<&DecorationType> {
        self.types.values().collect()
    }

    pub fn list_by_source(&self, source: RegistrySource) -> Vec<&DecorationType> {
        self.types.values().filter(|t| t.source == source).collect()
    }

    pub fn count(&self) -> usize {
        self.types.len()
    }

    /// Copy `other`'s entries in; `other` wins on id collisions.
    pub fn merge(&mut self, other: &TypeRegistry) {
        for (id, dec_type) in &other.types {
            self.types.insert(id.clone(), dec_type.clone());
        }
    }

    /// Load a registry file; a missing file is an empty registry.
    ///
    /// Each entry's id is reset to its map key.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(DecorationError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let file: TypeRegistryFile =
            serde_json::from_slice(&data).map_err(|source| DecorationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut registry = Self::new();
        for (id, mut dec_type) in file.types {
            dec_type.id = id;
            registry.register(dec_type);
        }
        debug!(path = %path.display(), count = registry.count(), "loaded type registry");
        Ok(registry)
    }

    /// Write the registry file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DecorationError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = TypeRegistryFile {
            version: REGISTRY_FILE_VERSION.to_string(),
            types: self.types.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(DecorationError::Serialize)?;
        fs::write(path, json).map_err(|source| DecorationError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), count = self.count(), "saved type registry");
        Ok(())
    }
}

/// Load system, then global, then workspace, so workspace entries win.
pub fn load_merged_type_registry(
    workspace: Option<&Path>,
    global: Option<&Path>,
    system: Option<&Path>,
) -> Result<TypeRegistry> {
    let scopes = [
        (RegistrySource::System, system),
        (RegistrySource::Global, global),
        (RegistrySource::Workspace, workspace),
    ];
    let mut merged = TypeRegistry::new();
    for (scope, path) in scopes {
        let Some(path) = path else { continue };
        let registry = TypeRegistry::load(path).map_err(|source| DecorationError::RegistryScope {
            scope,
            source: Box::new(source),
        })?;
        merged.merge(&registry);
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// RegistryPaths
// ---------------------------------------------------------------------------

/// Registry file locations for each scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPaths {
    pub workspace: Option<PathBuf>,
    pub global: Option<PathBuf>,
    pub system: PathBuf,
}

impl RegistryPaths {
    /// Standard locations. The global path is omitted when no home
    /// directory can be determined.
    pub fn standard(workspace_root: Option<&Path>) -> Self {
        Self {
            workspace: workspace_root.map(|root| root.join(".morphir/decorations/registry.json")),
            global: dirs::home_dir().map(|home| home.join(".morphir/decorations/registry.json")),
            system: PathBuf::from("/etc/morphir/decorations/registry.json"),
        }
    }

    /// File that `register` / `unregister` write for `source`.
    pub fn for_source(&self, source: RegistrySource) -> Option<&Path> {
        match source {
            RegistrySource::Workspace => self.workspace.as_deref(),
            RegistrySource::Global => self.global.as_deref(),
            RegistrySource::System => Some(self.system.as_path()),
        }
    }

    pub fn load_merged(&self) -> Result<TypeRegistry> {
        load_merged_type_registry(
            self.workspace.as_deref(),
            self.global.as_deref(),
            Some(self.system.as_path()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{shape_schema, write_schema};
    use tempfile::tempdir;

    fn dec_type(id: &str, source: RegistrySource) -> DecorationType {
        DecorationType::new(id, "schema.json", "My.Decoration:Foo:shape", source)
    }

    #[test]
    fn test_crud() {
        let mut registry = TypeRegistry::new();
        registry.register(dec_type("b", RegistrySource::Global));
        registry.register(dec_type("a", RegistrySource::Workspace));
        assert_eq!(registry.count(), 2);
        assert!(registry.has("a"));
        assert_eq!(
            registry.list().iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["a", "b"]
        );
        assert_eq!(registry.list_by_source(RegistrySource::Global).len(), 1);

        registry.register(dec_type("a", RegistrySource::Workspace).with_display_name("A"));
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get("a").unwrap().display_name, "A");

        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = TypeRegistry::new();
        base.register(dec_type("a", RegistrySource::System).with_display_name("old"));
        let mut other = TypeRegistry::new();
        other.register(dec_type("a", RegistrySource::Global).with_display_name("new"));
        base.merge(&other);
        assert_eq!(base.get("a").unwrap().display_name, "new");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".morphir/decorations/registry.json");
        let mut registry = TypeRegistry::new();
        registry.register(dec_type("a", RegistrySource::Workspace).with_description("docs"));
        registry.register(dec_type("b", RegistrySource::Workspace));
        registry.save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["types"]["a"]["source"], "workspace");
        assert!(json["types"]["b"].get("description").is_none());

        assert_eq!(TypeRegistry::load(&path).unwrap(), registry);
    }

    #[test]
    fn test_load_forces_id_to_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(
            &path,
            r#"{"version": "1.0", "types": {"real": {
                "id": "stale", "display_name": "X", "ir_path": "s.json",
                "entry_point": "A:B:c", "source": "global",
                "registered_at": "2025-01-01T00:00:00Z"}}}"#,
        )
        .unwrap();
        let registry = TypeRegistry::load(&path).unwrap();
        assert_eq!(registry.get("real").unwrap().id, "real");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert_eq!(TypeRegistry::load(&dir.path().join("absent.json")).unwrap().count(), 0);
    }

    #[test]
    fn test_workspace_scope_wins() {
        let dir = tempdir().unwrap();
        let paths = RegistryPaths {
            workspace: Some(dir.path().join("ws.json")),
            global: Some(dir.path().join("global.json")),
            system: dir.path().join("system.json"),
        };
        for (source, name) in [
            (RegistrySource::System, "from system"),
            (RegistrySource::Global, "from global"),
            (RegistrySource::Workspace, "from workspace"),
        ] {
            let mut r = TypeRegistry::new();
            r.register(dec_type("shared", source).with_display_name(name));
            r.register(dec_type(&format!("only-{source}"), source));
            r.save(paths.for_source(source).unwrap()).unwrap();
        }

        let merged = paths.load_merged().unwrap();
        assert_eq!(merged.get("shared").unwrap().display_name, "from workspace");
        assert_eq!(merged.count(), 4);
    }

    #[test]
    fn test_merged_load_names_failing_scope() {
        let dir = tempdir().unwrap();
        let system = dir.path().join("system.json");
        let global = dir.path().join("global.json");
        TypeRegistry::new().save(&system).unwrap();
        fs::write(&global, "{not json").unwrap();

        let err = load_merged_type_registry(None, Some(&global), Some(&system)).unwrap_err();
        assert!(matches!(
            err,
            DecorationError::RegistryScope { scope: RegistrySource::Global, .. }
        ));
        assert!(err.to_string().starts_with("failed to load global type registry"));
    }

    #[test]
    fn test_standard_paths() {
        let paths = RegistryPaths::standard(Some(Path::new("/ws")));
        assert_eq!(
            paths.workspace.as_deref(),
            Some(Path::new("/ws/.morphir/decorations/registry.json"))
        );
        assert_eq!(paths.system, PathBuf::from("/etc/morphir/decorations/registry.json"));
        assert!(RegistryPaths::standard(None).workspace.is_none());
    }

    #[test]
    fn test_validate_decoration_type() {
        let dir = tempdir().unwrap();
        let schema = write_schema(dir.path(), &shape_schema());

        let ok = DecorationType::new("shape", &schema, "My.Decoration:Foo:shape", RegistrySource::Workspace);
        validate_decoration_type(&ok).unwrap();

        let bad_ep = DecorationType::new("shape", &schema, "My.Decoration:Foo:nope", RegistrySource::Workspace);
        assert!(matches!(
            validate_decoration_type(&bad_ep),
            Err(DecorationError::EntryPoint(_))
        ));

        let missing = DecorationType::new(
            "shape",
            dir.path().join("absent.json"),
            "My.Decoration:Foo:shape",
            RegistrySource::Workspace,
        );
        assert!(matches!(
            validate_decoration_type(&missing),
            Err(DecorationError::IrNotFound(_))
        ));
    }
}
