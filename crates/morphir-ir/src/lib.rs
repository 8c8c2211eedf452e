// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Morphir IR model
//!
//! The subset of the Morphir intermediate representation needed to address
//! IR nodes and to describe, store and check data values against IR types:
//!
//! - **Naming**: [`Name`], [`Path`], [`FQName`], [`QualifiedModuleName`]
//! - **Addressing**: [`NodePath`]
//! - **Types**: [`Type`], [`TypeDefinition`], [`Constructor`]
//! - **Values**: [`Value`], [`Literal`]
//! - **Packaging**: [`ModuleDefinition`], [`PackageDefinition`], [`Distribution`]
//! - **Serialization**: the JSON [`codec`] (format version 3)
//!
//! # Example
//!
//! ```rust
//! use morphir_ir::{FQName, NodePath};
//!
//! let fq = FQName::from_strs("My.Package", "Foo", "bar");
//! let node = NodePath::from_fqname(&fq);
//! assert_eq!(node.to_string(), "My.Package:Foo:bar");
//! ```

pub mod codec;
mod fqname;
mod literal;
mod module;
mod name;
mod node_path;
pub mod sdk;
mod types;
mod value;

pub use codec::CodecError;
pub use fqname::{FQName, QualifiedModuleName};
pub use literal::Literal;
pub use module::{
    Access, AccessControlled, Distribution, Documented, ModuleDefinition, PackageDefinition,
    TypeEntry,
};
pub use name::{Name, Path};
pub use node_path::{NodePath, NodePathError};
pub use types::{equal_ignoring_attributes, Constructor, Field, Type, TypeDefinition};
pub use value::Value;
