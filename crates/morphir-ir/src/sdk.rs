// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! References to `Morphir.SDK` types.

use crate::fqname::FQName;
use crate::name::Name;
use crate::types::Type;

/// Package path of the Morphir SDK.
pub const SDK_PACKAGE: &str = "Morphir.SDK";

/// FQName of an SDK type, e.g. `sdk_fqname("Basics", "int")`.
pub fn sdk_fqname(module: &str, local: &str) -> FQName {
    FQName::from_strs(SDK_PACKAGE, module, local)
}

fn sdk_reference(module: &str, local: &str) -> Type<()> {
    Type::Reference((), sdk_fqname(module, local), Vec::new())
}

pub fn bool_type() -> Type<()> {
    sdk_reference("Basics", "bool")
}

pub fn string_type() -> Type<()> {
    sdk_reference("String", "string")
}

pub fn char_type() -> Type<()> {
    sdk_reference("Char", "char")
}

pub fn int_type() -> Type<()> {
    sdk_reference("Basics", "int")
}

pub fn float_type() -> Type<()> {
    sdk_reference("Basics", "float")
}

pub fn decimal_type() -> Type<()> {
    sdk_reference("Decimal", "decimal")
}

/// `List item`.
pub fn list_type(item: Type<()>) -> Type<()> {
    Type::Reference((), sdk_fqname("List", "list"), vec![item])
}

/// A type variable, e.g. `a`.
pub fn variable(name: &str) -> Type<()> {
    Type::Variable((), Name::parse(name))
}
