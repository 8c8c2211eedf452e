// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde_json::{json, Map, Value as Json};

use super::types::{decode_access_controlled, decode_type_definition_at, encode_access, encode_type_definition};
use super::{arity, as_array, as_str, leaf, leaf_json, shape, tag, tagged, CodecError, Result, FORMAT_VERSION};
use crate::module::{Distribution, Documented, ModuleDefinition, PackageDefinition, TypeEntry};
use crate::name::{Name, Path};

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

pub fn encode_distribution(dist: &Distribution) -> Json {
    match dist {
        Distribution::Library {
            package_name,
            dependencies,
            definition,
        } => json!([
            tag("Library"),
            leaf_json(package_name),
            dependencies,
            encode_package(definition)
        ]),
    }
}

/// Wrap a distribution as `{"formatVersion": 3, "distribution": ...}`.
pub fn encode_distribution_file_payload(dist: &Distribution) -> Json {
    json!({
        "formatVersion": FORMAT_VERSION,
        "distribution": encode_distribution(dist),
    })
}

fn encode_package(pkg: &PackageDefinition) -> Json {
    let modules: Vec<Json> = pkg
        .modules
        .iter()
        .map(|(path, module)| {
            json!([
                leaf_json(path),
                { "access": encode_access(module.access), "value": encode_module(&module.value) }
            ])
        })
        .collect();
    json!({ "modules": modules })
}

fn encode_module(module: &ModuleDefinition) -> Json {
    let types: Vec<Json> = module
        .types
        .iter()
        .map(|(name, entry)| {
            json!([
                leaf_json(name),
                {
                    "access": encode_access(entry.access),
                    "value": {
                        "doc": entry.value.doc,
                        "value": encode_type_definition(&entry.value.value),
                    }
                }
            ])
        })
        .collect();
    let values: Vec<Json> = module
        .values
        .iter()
        .map(|(name, def)| json!([leaf_json(name), def]))
        .collect();

    let mut obj = Map::new();
    obj.insert("types".into(), Json::Array(types));
    obj.insert("values".into(), Json::Array(values));
    if let Some(doc) = &module.doc {
        obj.insert("doc".into(), Json::String(doc.clone()));
    }
    Json::Object(obj)
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

pub fn decode_distribution(json: &Json) -> Result<Distribution> {
    let ctx = "distribution";
    let (t, rest) = tagged(json, ctx)?;
    match t {
        "Library" | "library" => {
            let rest = arity(rest, 3, ctx, "[\"Library\", packageName, dependencies, definition]")?;
            let package_name: Path = leaf(&rest[0], ctx, "a package path")?;
            let dependencies = rest[1].clone();
            let definition = decode_package(&rest[2], "distribution.definition")?;
            Ok(Distribution::Library {
                package_name,
                dependencies,
                definition,
            })
        }
        other => Err(CodecError::UnknownTag {
            context: ctx.to_string(),
            tag: other.to_string(),
        }),
    }
}

/// Decode the contents of an IR file.
///
/// Accepts both a bare distribution and the `{formatVersion, distribution}`
/// wrapper written by the Morphir tooling.
pub fn decode_distribution_file_payload(bytes: &[u8]) -> Result<Distribution> {
    let json: Json = serde_json::from_slice(bytes)?;
    match json.get("distribution") {
        Some(inner) if json.is_object() => {
            if let Some(version) = json.get("formatVersion").and_then(Json::as_u64) {
                if version > FORMAT_VERSION {
                    return Err(CodecError::UnsupportedVersion(version));
                }
            }
            decode_distribution(inner)
        }
        _ => decode_distribution(&json),
    }
}

fn decode_package(json: &Json, ctx: &str) -> Result<PackageDefinition> {
    let modules = json
        .get("modules")
        .ok_or_else(|| shape(ctx, "an object with \"modules\""))?;
    let modules = as_array(modules, ctx)?
        .iter()
        .map(|entry| {
            let pair = as_array(entry, ctx)?;
            if pair.len() != 2 {
                return Err(shape(ctx, "a [path, module] pair"));
            }
            let path: Path = leaf(&pair[0], ctx, "a module path")?;
            let mctx = format!("{ctx}.{path}");
            let module = decode_access_controlled(&pair[1], &mctx, decode_module)?;
            Ok((path, module))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PackageDefinition { modules })
}

fn decode_module(json: &Json, ctx: &str) -> Result<ModuleDefinition> {
    let types = match json.get("types") {
        Some(types) => as_array(types, ctx)?
            .iter()
            .map(|entry| decode_type_entry(entry, ctx))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    let values = match json.get("values") {
        Some(values) => as_array(values, ctx)?
            .iter()
            .map(|entry| {
                let pair = as_array(entry, ctx)?;
                if pair.len() != 2 {
                    return Err(shape(ctx, "a [name, definition] pair"));
                }
                let name: Name = leaf(&pair[0], ctx, "a value name")?;
                Ok((name, pair[1].clone()))
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    let doc = match json.get("doc") {
        Some(Json::Null) | None => None,
        Some(doc) => Some(as_str(doc, ctx)?.to_string()),
    };
    Ok(ModuleDefinition { types, values, doc })
}

fn decode_type_entry(json: &Json, ctx: &str) -> Result<(Name, TypeEntry)> {
    let pair = as_array(json, ctx)?;
    if pair.len() != 2 {
        return Err(shape(ctx, "a [name, definition] pair"));
    }
    let name: Name = leaf(&pair[0], ctx, "a type name")?;
    let tctx = format!("{ctx}.{}", name.to_camel_case());
    let entry = decode_access_controlled(&pair[1], &tctx, |inner, ctx| {
        let doc = match inner.get("doc") {
            Some(Json::String(s)) => s.clone(),
            _ => String::new(),
        };
        let def = inner
            .get("value")
            .ok_or_else(|| shape(ctx, "a documented definition with \"value\""))?;
        Ok(Documented::new(doc, decode_type_definition_at(def, ctx)?))
    })?;
    Ok((name, entry))
}
