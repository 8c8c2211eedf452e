// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-level error type.

use std::io;
use std::path::PathBuf;

use morphir_ir::{CodecError, NodePathError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::EntryPointError;
use crate::type_registry::RegistrySource;
use crate::validate::ValidationError;

/// Errors raised while loading, validating, attaching or persisting decorations.
#[derive(Debug, Error)]
pub enum DecorationError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid node path {key:?} in {}: {source}", path.display())]
    InvalidNodePath {
        key: String,
        path: PathBuf,
        #[source]
        source: NodePathError,
    },

    #[error("node path keys {first:?} and {second:?} in {} name the same node", path.display())]
    DuplicateNodePath {
        first: String,
        second: String,
        path: PathBuf,
    },

    #[error("decoration IR file not found: {}", .0.display())]
    IrNotFound(PathBuf),

    #[error("failed to decode decoration IR {}: {source}", path.display())]
    DecodeIr {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("invalid entry point: {0}")]
    EntryPoint(#[from] EntryPointError),

    #[error("decoration {id:?} failed validation with {count} error(s)")]
    ValidationFailed {
        id: String,
        count: usize,
        errors: Vec<ValidationError>,
    },

    #[error("decoration {id:?}: {source}")]
    InDecoration {
        id: String,
        #[source]
        source: Box<DecorationError>,
    },

    #[error("failed to load {scope} type registry: {source}")]
    RegistryScope {
        scope: RegistrySource,
        #[source]
        source: Box<DecorationError>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, DecorationError>;
