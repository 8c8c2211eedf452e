// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed decorations for Morphir IR.
//!
//! Decorations are side-car metadata attached to IR nodes. Each decoration
//! kind has a schema (a small Morphir IR distribution plus an entry point
//! naming one of its types) and a values file mapping node paths to IR
//! values of that type.
//!
//! # Features
//!
//! - **Storage**: load, save and edit decoration values files
//! - **Validation**: type-check every value against its schema
//! - **Registry**: immutable aggregate of decorations across kinds
//! - **Attachment**: pair a distribution with its decorations and query them
//! - **Type catalog**: workspace, global and system registries of reusable
//!   decoration types
//!
//! # Architecture
//!
//! ```text
//! ProjectDecorations (config)
//!        |
//!        v
//!   load_decoration_ir + load_decoration_values
//!        |  (optional validate_decoration_values)
//!        v
//!   DecorationRegistry (merged, immutable)
//!        |
//!        v
//!   AttachedDistribution (queries)
//! ```

mod attach;
pub mod config;
mod error;
mod filter;
mod query;
mod registry;
mod schema;
mod storage;
pub mod type_registry;
mod typecheck;
mod validate;
mod values;

#[cfg(test)]
mod test_support;

pub use attach::{load_and_attach_decorations, AttachedDistribution};
pub use config::{ConfigError, DecorationConfig, DecorationConfigBuilder, ProjectDecorations};
pub use error::{DecorationError, Result};
pub use filter::{DecorationFilter, DecorationStats};
pub use registry::{DecorationId, DecorationMap, DecorationRegistry};
pub use schema::{
    extract_decoration_type, load_decoration_ir, validate_entry_point, DecorationIr, EntryPoint,
    EntryPointError,
};
pub use storage::{
    get_decoration_value_for_node_path, load_decoration_values,
    remove_decoration_value_for_node_path, save_decoration_values,
    set_decoration_value_for_node_path,
};
pub use type_registry::{
    load_merged_type_registry, validate_decoration_type, DecorationType, RegistryPaths,
    RegistrySource, TypeRegistry,
};
pub use typecheck::{TypeCheckError, TypeChecker};
pub use validate::{
    validate_decoration_value, validate_decoration_value_file, validate_decoration_values,
    ValidationCause, ValidationError, ValidationResult,
};
pub use values::{DecorationValue, DecorationValues};
