// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema fixtures shared by unit tests.

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use morphir_ir::{
    codec, sdk, AccessControlled, Constructor, Distribution, Documented, Field, ModuleDefinition,
    Name, PackageDefinition, Path, Type, TypeDefinition,
};

use crate::schema::DecorationIr;

pub const PACKAGE: &str = "My.Decoration";
pub const MODULE: &str = "Foo";

pub fn alias(tpe: Type<()>) -> TypeDefinition<()> {
    TypeDefinition::TypeAlias {
        params: Vec::new(),
        tpe,
    }
}

pub fn custom(ctors: Vec<(&str, Vec<(&str, Type<()>)>)>) -> TypeDefinition<()> {
    let constructors = ctors
        .into_iter()
        .map(|(name, args)| {
            Constructor::new(
                Name::parse(name),
                args.into_iter().map(|(n, t)| (Name::parse(n), t)).collect(),
            )
        })
        .collect();
    TypeDefinition::CustomType {
        params: Vec::new(),
        constructors: AccessControlled::public(constructors),
    }
}

pub fn record_type(fields: &[(&str, Type<()>)]) -> Type<()> {
    Type::Record(
        (),
        fields
            .iter()
            .map(|(n, t)| Field::new(Name::parse(n), t.clone()))
            .collect(),
    )
}

/// Schema package `My.Decoration` with module `Foo` holding `types`.
pub fn schema(types: Vec<(&str, TypeDefinition<()>)>) -> DecorationIr {
    let module = ModuleDefinition {
        types: types
            .into_iter()
            .map(|(n, def)| {
                (
                    Name::parse(n),
                    AccessControlled::public(Documented::undocumented(def)),
                )
            })
            .collect(),
        ..Default::default()
    };
    let dist = Distribution::library(
        Path::parse(PACKAGE),
        PackageDefinition {
            modules: vec![(Path::parse(MODULE), AccessControlled::public(module))],
        },
    );
    DecorationIr::new(dist, "schema.json")
}

/// `type alias Shape = ()`.
pub fn shape_schema() -> DecorationIr {
    schema(vec![("shape", alias(Type::Unit(())))])
}

/// A schema exercising every inference path.
pub fn rich_schema() -> DecorationIr {
    schema(vec![
        ("shape", alias(Type::Unit(()))),
        ("label", alias(sdk::string_type())),
        (
            "entry",
            alias(record_type(&[
                ("name", sdk::string_type()),
                ("value", sdk::int_type()),
            ])),
        ),
        ("tags", alias(sdk::list_type(sdk::string_type()))),
        (
            "pair",
            alias(Type::Tuple((), vec![sdk::bool_type(), sdk::float_type()])),
        ),
        (
            "color",
            custom(vec![
                ("red", vec![]),
                ("custom", vec![("code", sdk::string_type())]),
            ]),
        ),
        (
            "range",
            custom(vec![(
                "between",
                vec![("low", sdk::int_type()), ("high", sdk::int_type())],
            )]),
        ),
        ("level", custom(vec![("high", vec![]), ("low", vec![])])),
    ])
}

/// Write `ir` to `dir/schema.json` in the wrapped file format.
pub fn write_schema(dir: &FsPath, ir: &DecorationIr) -> PathBuf {
    let path = dir.join("schema.json");
    let payload = codec::encode_distribution_file_payload(ir.distribution());
    fs::write(&path, payload.to_string()).unwrap();
    path
}
