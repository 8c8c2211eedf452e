// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Project decoration configuration.
//!
//! Read from the `decorations` section of `morphir.json`:
//!
//! ```json
//! {
//!   "decorations": {
//!     "myDecoration": {
//!       "displayName": "My Amazing Decoration",
//!       "ir": "decorations/my/morphir-ir.json",
//!       "entryPoint": "My.Amazing.Decoration:Foo:Shape",
//!       "storageLocation": "my-decoration-values.json"
//!     }
//!   }
//! }
//! ```
//!
//! or from a TOML file with `[decorations.<id>]` tables using the same keys.
//! [`ProjectDecorations::save_decoration`] writes one entry back, leaving the
//! rest of the file alone.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::registry::DecorationId;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// DecorationConfig
// ---------------------------------------------------------------------------

/// Settings for one decoration kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationConfig {
    /// Human-readable name.
    #[serde(default, alias = "display_name")]
    pub display_name: String,

    /// Schema IR file.
    pub ir: PathBuf,

    /// `Package:Module:localName` of the schema type.
    #[serde(alias = "entry_point")]
    pub entry_point: String,

    /// Values file.
    #[serde(alias = "storage_location")]
    pub storage_location: PathBuf,
}

impl DecorationConfig {
    pub fn builder() -> DecorationConfigBuilder {
        DecorationConfigBuilder::default()
    }

    /// Rebase relative paths onto `base`.
    pub fn resolve_relative_to(&self, base: &Path) -> Self {
        Self {
            display_name: self.display_name.clone(),
            ir: rebase(base, &self.ir),
            entry_point: self.entry_point.clone(),
            storage_location: rebase(base, &self.storage_location),
        }
    }

    pub fn validate(&self, id: &DecorationId) -> Result<(), ConfigError> {
        if self.ir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "decoration '{id}': 'ir' must not be empty"
            )));
        }
        if self.entry_point.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "decoration '{id}': 'entryPoint' must not be empty"
            )));
        }
        if self.storage_location.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "decoration '{id}': 'storageLocation' must not be empty"
            )));
        }
        Ok(())
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Builder for [`DecorationConfig`].
#[derive(Debug, Default)]
pub struct DecorationConfigBuilder {
    display_name: String,
    ir: PathBuf,
    entry_point: String,
    storage_location: PathBuf,
}

impl DecorationConfigBuilder {
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn ir(mut self, path: impl Into<PathBuf>) -> Self {
        self.ir = path.into();
        self
    }

    pub fn entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn storage_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_location = path.into();
        self
    }

    pub fn build(self) -> DecorationConfig {
        DecorationConfig {
            display_name: self.display_name,
            ir: self.ir,
            entry_point: self.entry_point,
            storage_location: self.storage_location,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectDecorations
// ---------------------------------------------------------------------------

/// All decoration kinds configured for a project, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDecorations {
    #[serde(default)]
    decorations: BTreeMap<DecorationId, DecorationConfig>,
}

impl ProjectDecorations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `morphir.json` or a `.toml` file, chosen by extension.
    ///
    /// Keys other than `decorations` are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let project = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };
        debug!(
            path = %path.display(),
            decorations = project.len(),
            "loaded project decorations"
        );
        Ok(project)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Add or replace one entry in the project file's `decorations` section.
    ///
    /// Other keys are preserved. A missing file is created.
    pub fn save_decoration<P: AsRef<Path>>(
        path: P,
        id: &DecorationId,
        config: &DecorationConfig,
    ) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let existing = match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let output = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                let mut doc: toml::Table = match &existing {
                    Some(content) => toml::from_str(content)?,
                    None => toml::Table::new(),
                };
                let entry = toml::Value::try_from(config)?;
                match doc
                    .entry("decorations")
                    .or_insert(toml::Value::Table(toml::Table::new()))
                {
                    toml::Value::Table(section) => {
                        section.insert(id.to_string(), entry);
                    }
                    _ => return Err(ConfigError::Invalid("'decorations' is not a table".into())),
                }
                toml::to_string_pretty(&doc)?
            }
            _ => {
                let mut doc: serde_json::Map<String, serde_json::Value> = match &existing {
                    Some(content) => serde_json::from_str(content)?,
                    None => serde_json::Map::new(),
                };
                let entry = serde_json::to_value(config)?;
                match doc
                    .entry("decorations")
                    .or_insert(serde_json::Value::Object(serde_json::Map::new()))
                {
                    serde_json::Value::Object(section) => {
                        section.insert(id.to_string(), entry);
                    }
                    _ => return Err(ConfigError::Invalid("'decorations' is not an object".into())),
                }
                serde_json::to_string_pretty(&doc)?
            }
        };

        std::fs::write(path, output)?;
        debug!(path = %path.display(), decoration = %id, "saved decoration config");
        Ok(())
    }

    pub fn with_decoration(mut self, id: impl Into<DecorationId>, config: DecorationConfig) -> Self {
        self.decorations.insert(id.into(), config);
        self
    }

    pub fn get(&self, id: &DecorationId) -> Option<&DecorationConfig> {
        self.decorations.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DecorationId, &DecorationConfig)> {
        self.decorations.iter()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Rebase every relative path onto the project directory.
    pub fn resolve_relative_to(&self, base: &Path) -> Self {
        Self {
            decorations: self
                .decorations
                .iter()
                .map(|(id, cfg)| (id.clone(), cfg.resolve_relative_to(base)))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, cfg) in &self.decorations {
            cfg.validate(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MORPHIR_JSON: &str = r#"{
        "name": "My.Package",
        "sourceDirectory": "src",
        "decorations": {
            "myDecoration": {
                "displayName": "My Amazing Decoration",
                "ir": "decorations/my/morphir-ir.json",
                "entryPoint": "My.Amazing.Decoration:Foo:Shape",
                "storageLocation": "my-decoration-values.json"
            }
        }
    }"#;

    #[test]
    fn test_parse_morphir_json() {
        let project = ProjectDecorations::from_json_str(MORPHIR_JSON).unwrap();
        let cfg = project.get(&DecorationId::from("myDecoration")).unwrap();
        assert_eq!(cfg.display_name, "My Amazing Decoration");
        assert_eq!(cfg.entry_point, "My.Amazing.Decoration:Foo:Shape");
        assert_eq!(cfg.storage_location, PathBuf::from("my-decoration-values.json"));
        project.validate().unwrap();
    }

    #[test]
    fn test_missing_decorations_section() {
        let project = ProjectDecorations::from_json_str(r#"{"name": "My.Package"}"#).unwrap();
        assert!(project.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [decorations.docs]
            display_name = "Docs"
            ir = "schema.json"
            entryPoint = "My.Decoration:Foo:shape"
            storage_location = "docs.json"
        "#;
        let project = ProjectDecorations::from_toml_str(toml).unwrap();
        let cfg = project.get(&DecorationId::from("docs")).unwrap();
        assert_eq!(cfg.display_name, "Docs");
        assert_eq!(cfg.ir, PathBuf::from("schema.json"));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("morphir.json");
        std::fs::write(&json_path, MORPHIR_JSON).unwrap();
        assert_eq!(ProjectDecorations::from_file(&json_path).unwrap().len(), 1);

        let toml_path = dir.path().join("morphir.toml");
        std::fs::write(
            &toml_path,
            "[decorations.a]\nir = \"a.json\"\nentryPoint = \"A:B:c\"\nstorageLocation = \"v.json\"\n",
        )
        .unwrap();
        assert_eq!(ProjectDecorations::from_file(&toml_path).unwrap().len(), 1);

        assert!(matches!(
            ProjectDecorations::from_file(dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_resolve_relative_to() {
        let project = ProjectDecorations::new().with_decoration(
            "docs",
            DecorationConfig::builder()
                .ir("schema.json")
                .entry_point("A:B:c")
                .storage_location("/abs/values.json")
                .build(),
        );
        let resolved = project.resolve_relative_to(Path::new("/project"));
        let cfg = resolved.get(&DecorationId::from("docs")).unwrap();
        assert_eq!(cfg.ir, PathBuf::from("/project/schema.json"));
        assert_eq!(cfg.storage_location, PathBuf::from("/abs/values.json"));
    }

    #[test]
    fn test_validation_rejects_empty_fields() {
        let project = ProjectDecorations::new().with_decoration(
            "docs",
            DecorationConfig::builder().ir("schema.json").storage_location("v.json").build(),
        );
        assert!(matches!(project.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_decoration_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("morphir.json");
        std::fs::write(&path, MORPHIR_JSON).unwrap();

        let shape = DecorationConfig::builder()
            .display_name("Shape")
            .ir("shape-ir.json")
            .entry_point("My.Decoration:Foo:shape")
            .storage_location("shape-values.json")
            .build();
        ProjectDecorations::save_decoration(&path, &DecorationId::from("shape"), &shape).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["name"], "My.Package");
        assert_eq!(raw["sourceDirectory"], "src");
        assert_eq!(raw["decorations"]["shape"]["entryPoint"], "My.Decoration:Foo:shape");

        let project = ProjectDecorations::from_file(&path).unwrap();
        assert_eq!(project.len(), 2);
        assert_eq!(project.get(&DecorationId::from("shape")), Some(&shape));
    }

    #[test]
    fn test_save_decoration_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("morphir.toml");
        std::fs::write(&path, "name = \"My.Package\"\n").unwrap();

        let docs = DecorationConfig::builder()
            .ir("docs-ir.json")
            .entry_point("A:B:c")
            .storage_location("docs-values.json")
            .build();
        ProjectDecorations::save_decoration(&path, &DecorationId::from("docs"), &docs).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("name = \"My.Package\""));
        let project = ProjectDecorations::from_file(&path).unwrap();
        assert_eq!(project.get(&DecorationId::from("docs")), Some(&docs));
    }

    #[test]
    fn test_save_decoration_rejects_non_object_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("morphir.json");
        std::fs::write(&path, r#"{"decorations": []}"#).unwrap();
        let cfg = DecorationConfig::builder().ir("a").entry_point("A:B:c").storage_location("v").build();
        assert!(matches!(
            ProjectDecorations::save_decoration(&path, &DecorationId::from("a"), &cfg),
            Err(ConfigError::Invalid(_))
        ));
    }
}
