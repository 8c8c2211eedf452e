// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoration value files.
//!
//! One JSON file per decoration kind, mapping node path strings to encoded
//! IR values:
//!
//! ```json
//! {
//!   "My.Package:Foo:bar": ["Literal", [], ["StringLiteral", "hello"]],
//!   "My.Package:Foo": ["Unit", []]
//! }
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use morphir_ir::NodePath;
use tracing::debug;

use crate::error::{DecorationError, Result};
use crate::values::{DecorationValue, DecorationValues};

/// Load a values file.
///
/// A missing file yields an empty snapshot. Every key must parse as a node
/// path, otherwise the whole load fails. Keys come back in canonical form;
/// two keys naming the same node are rejected.
pub fn load_decoration_values(path: &Path) -> Result<DecorationValues> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "decoration values file absent, using empty set");
            return Ok(DecorationValues::empty());
        }
        Err(source) => {
            return Err(DecorationError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let raw: BTreeMap<String, DecorationValue> =
        serde_json::from_slice(&data).map_err(|source| DecorationError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    // Stored under the canonical string.
    let mut canonical: BTreeMap<String, (String, DecorationValue)> = BTreeMap::new();
    for (key, value) in raw {
        let node = key
            .parse::<NodePath>()
            .map_err(|source| DecorationError::InvalidNodePath {
                key: key.clone(),
                path: path.to_path_buf(),
                source,
            })?;
        match canonical.entry(node.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert((key, value));
            }
            Entry::Occupied(slot) => {
                return Err(DecorationError::DuplicateNodePath {
                    first: slot.get().0.clone(),
                    second: key,
                    path: path.to_path_buf(),
                });
            }
        }
    }

    debug!(path = %path.display(), count = canonical.len(), "loaded decoration values");
    Ok(canonical
        .into_iter()
        .map(|(node, (_, value))| (node, value))
        .collect())
}

/// Write a values file, creating parent directories as needed.
pub fn save_decoration_values(path: &Path, values: &DecorationValues) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DecorationError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(values).map_err(DecorationError::Serialize)?;
    fs::write(path, json).map_err(|source| DecorationError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = values.count(), "saved decoration values");
    Ok(())
}

/// Load the file and return one node's value.
pub fn get_decoration_value_for_node_path(
    path: &Path,
    node: &NodePath,
) -> Result<Option<DecorationValue>> {
    Ok(load_decoration_values(path)?.get(node))
}

/// Load the file, set one node's value and write it back.
pub fn set_decoration_value_for_node_path(
    path: &Path,
    node: &NodePath,
    value: DecorationValue,
) -> Result<()> {
    let values = load_decoration_values(path)?;
    save_decoration_values(path, &values.with_value(node, value))
}

/// Load the file, drop one node's value and write it back.
pub fn remove_decoration_value_for_node_path(path: &Path, node: &NodePath) -> Result<()> {
    let values = load_decoration_values(path)?;
    save_decoration_values(path, &values.without_value(node))
}
