// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validation of decoration values against their schema.
//!
//! Validation reports one error per bad entry and keeps going, so a single
//! malformed value never hides problems with the rest.

use std::fmt;
use std::path::Path;

use morphir_ir::{CodecError, NodePath, NodePathError};
use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::schema::{DecorationIr, EntryPointError};
use crate::storage::load_decoration_values;
use crate::typecheck::{TypeCheckError, TypeChecker};
use crate::values::{DecorationValue, DecorationValues};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Underlying cause of a [`ValidationError`].
#[derive(Debug, Error)]
pub enum ValidationCause {
    #[error(transparent)]
    NodePath(#[from] NodePathError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    #[error(transparent)]
    TypeCheck(#[from] TypeCheckError),
}

/// A validation failure for one node.
#[derive(Debug)]
pub struct ValidationError {
    /// Canonical node path, or the raw key when it does not parse.
    pub node_path: String,
    pub message: String,
    pub cause: Option<ValidationCause>,
}

impl ValidationError {
    pub fn new(
        node_path: impl Into<String>,
        message: impl Into<String>,
        cause: impl Into<ValidationCause>,
    ) -> Self {
        Self {
            node_path: node_path.into(),
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decoration validation error at {:?}: {}",
            self.node_path, self.message
        )?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Aggregate outcome of validating a values snapshot.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    /// Entries examined, whatever their outcome.
    pub checked: usize,
}

impl ValidationResult {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate one encoded value.
pub fn validate_decoration_value(
    dec_ir: &DecorationIr,
    entry_point: &str,
    node: &NodePath,
    value: &DecorationValue,
) -> std::result::Result<(), ValidationError> {
    let node_str = node.to_string();
    let decoded = value
        .decode()
        .map_err(|e| ValidationError::new(&node_str, "invalid Morphir IR value JSON", e))?;
    let checker = TypeChecker::new(dec_ir, entry_point)
        .map_err(|e| ValidationError::new(&node_str, "failed to create type checker", e))?;
    checker
        .check_value_type(&decoded)
        .map_err(|e| ValidationError::new(node_str, "type check failed", e))
}

/// Validate every entry of a snapshot.
pub fn validate_decoration_values(
    dec_ir: &DecorationIr,
    entry_point: &str,
    values: &DecorationValues,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (key, value) in values.iter() {
        let node = match key.parse::<NodePath>() {
            Ok(node) => node,
            Err(e) => {
                errors.push(ValidationError::new(
                    key,
                    format!("invalid NodePath {key:?}"),
                    e,
                ));
                continue;
            }
        };
        if let Err(e) = validate_decoration_value(dec_ir, entry_point, &node, value) {
            errors.push(e);
        }
    }

    let result = ValidationResult {
        valid: errors.is_empty(),
        errors,
        checked: values.count(),
    };
    debug!(
        entry_point,
        checked = result.checked,
        errors = result.error_count(),
        "validated decoration values"
    );
    result
}

/// Load a values file and validate it. Load failures are returned as errors.
pub fn validate_decoration_value_file(
    dec_ir: &DecorationIr,
    entry_point: &str,
    path: &Path,
) -> Result<ValidationResult> {
    let values = load_decoration_values(path)?;
    Ok(validate_decoration_values(dec_ir, entry_point, &values))
}
