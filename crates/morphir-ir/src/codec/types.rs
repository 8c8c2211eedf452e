// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde_json::{json, Value as Json};

use super::{arity, as_array, as_str, leaf, leaf_json, shape, tag, tagged, unit_attr, CodecError, Result};
use crate::module::{Access, AccessControlled};
use crate::name::Name;
use crate::types::{Constructor, Field, Type, TypeDefinition};

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

pub fn encode_type(tpe: &Type<()>) -> Json {
    match tpe {
        Type::Variable((), name) => json!([tag("Variable"), unit_attr(), leaf_json(name)]),
        Type::Reference((), fqname, args) => json!([
            tag("Reference"),
            unit_attr(),
            leaf_json(fqname),
            args.iter().map(encode_type).collect::<Vec<_>>()
        ]),
        Type::Tuple((), elems) => json!([
            tag("Tuple"),
            unit_attr(),
            elems.iter().map(encode_type).collect::<Vec<_>>()
        ]),
        Type::Record((), fields) => json!([tag("Record"), unit_attr(), encode_fields(fields)]),
        Type::ExtensibleRecord((), var, fields) => json!([
            tag("ExtensibleRecord"),
            unit_attr(),
            leaf_json(var),
            encode_fields(fields)
        ]),
        Type::Function((), arg, ret) => json!([
            tag("Function"),
            unit_attr(),
            encode_type(arg),
            encode_type(ret)
        ]),
        Type::Unit(()) => json!([tag("Unit"), unit_attr()]),
    }
}

fn encode_fields(fields: &[Field<()>]) -> Json {
    Json::Array(
        fields
            .iter()
            .map(|f| json!({ "name": leaf_json(&f.name), "tpe": encode_type(&f.tpe) }))
            .collect(),
    )
}

pub fn decode_type(json: &Json) -> Result<Type<()>> {
    decode_type_at(json, "type")
}

fn decode_type_at(json: &Json, ctx: &str) -> Result<Type<()>> {
    let (t, rest) = tagged(json, ctx)?;
    match t {
        "Variable" => {
            let rest = arity(rest, 2, ctx, "[\"Variable\", attrs, name]")?;
            Ok(Type::Variable((), leaf(&rest[1], ctx, "a name")?))
        }
        "Reference" => {
            let rest = arity(rest, 3, ctx, "[\"Reference\", attrs, fqname, args]")?;
            let fqname = leaf(&rest[1], ctx, "a fully-qualified name")?;
            let args = decode_types(&rest[2], ctx)?;
            Ok(Type::Reference((), fqname, args))
        }
        "Tuple" => {
            let rest = arity(rest, 2, ctx, "[\"Tuple\", attrs, elements]")?;
            Ok(Type::Tuple((), decode_types(&rest[1], ctx)?))
        }
        "Record" => {
            let rest = arity(rest, 2, ctx, "[\"Record\", attrs, fields]")?;
            Ok(Type::Record((), decode_fields(&rest[1], ctx)?))
        }
        "ExtensibleRecord" => {
            let rest = arity(rest, 3, ctx, "[\"ExtensibleRecord\", attrs, name, fields]")?;
            Ok(Type::ExtensibleRecord(
                (),
                leaf(&rest[1], ctx, "a name")?,
                decode_fields(&rest[2], ctx)?,
            ))
        }
        "Function" => {
            let rest = arity(rest, 3, ctx, "[\"Function\", attrs, arg, result]")?;
            Ok(Type::Function(
                (),
                Box::new(decode_type_at(&rest[1], &format!("{ctx}.arg"))?),
                Box::new(decode_type_at(&rest[2], &format!("{ctx}.result"))?),
            ))
        }
        "Unit" => {
            arity(rest, 1, ctx, "[\"Unit\", attrs]")?;
            Ok(Type::Unit(()))
        }
        other => Err(CodecError::UnknownTag {
            context: ctx.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn decode_types(json: &Json, ctx: &str) -> Result<Vec<Type<()>>> {
    as_array(json, ctx)?
        .iter()
        .enumerate()
        .map(|(i, t)| decode_type_at(t, &format!("{ctx}[{i}]")))
        .collect()
}

fn decode_fields(json: &Json, ctx: &str) -> Result<Vec<Field<()>>> {
    as_array(json, ctx)?
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let fctx = format!("{ctx}.fields[{i}]");
            let name = f.get("name").ok_or_else(|| shape(&fctx, "a field with \"name\""))?;
            let tpe = f.get("tpe").ok_or_else(|| shape(&fctx, "a field with \"tpe\""))?;
            let name: Name = leaf(name, &fctx, "a name")?;
            let tpe = decode_type_at(tpe, &format!("{fctx}.{}", name.to_camel_case()))?;
            Ok(Field::new(name, tpe))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

pub(super) fn encode_access(access: Access) -> Json {
    match access {
        Access::Public => tag("Public"),
        Access::Private => tag("Private"),
    }
}

pub(super) fn decode_access_controlled<T>(
    json: &Json,
    ctx: &str,
    decode_inner: impl FnOnce(&Json, &str) -> Result<T>,
) -> Result<AccessControlled<T>> {
    let access = json
        .get("access")
        .ok_or_else(|| shape(ctx, "an object with \"access\""))?;
    let access = match as_str(access, ctx)? {
        "Public" | "public" => Access::Public,
        "Private" | "private" => Access::Private,
        other => {
            return Err(CodecError::UnknownTag {
                context: format!("{ctx}.access"),
                tag: other.to_string(),
            })
        }
    };
    let value = json
        .get("value")
        .ok_or_else(|| shape(ctx, "an object with \"value\""))?;
    Ok(AccessControlled {
        access,
        value: decode_inner(value, ctx)?,
    })
}

// ---------------------------------------------------------------------------
// Type definitions
// ---------------------------------------------------------------------------

pub fn encode_type_definition(def: &TypeDefinition<()>) -> Json {
    match def {
        TypeDefinition::TypeAlias { params, tpe } => json!([
            tag("TypeAliasDefinition"),
            leaf_json(params),
            encode_type(tpe)
        ]),
        TypeDefinition::CustomType {
            params,
            constructors,
        } => {
            let ctors: Vec<Json> = constructors
                .value
                .iter()
                .map(|c| {
                    let args: Vec<Json> = c
                        .args
                        .iter()
                        .map(|(n, t)| json!([leaf_json(n), encode_type(t)]))
                        .collect();
                    json!([leaf_json(&c.name), args])
                })
                .collect();
            json!([
                tag("CustomTypeDefinition"),
                leaf_json(params),
                { "access": encode_access(constructors.access), "value": ctors }
            ])
        }
    }
}

pub fn decode_type_definition(json: &Json) -> Result<TypeDefinition<()>> {
    decode_type_definition_at(json, "typeDefinition")
}

pub(super) fn decode_type_definition_at(json: &Json, ctx: &str) -> Result<TypeDefinition<()>> {
    let (t, rest) = tagged(json, ctx)?;
    match t {
        "TypeAliasDefinition" => {
            let rest = arity(rest, 2, ctx, "[\"TypeAliasDefinition\", params, type]")?;
            Ok(TypeDefinition::TypeAlias {
                params: leaf(&rest[0], ctx, "a list of type parameter names")?,
                tpe: decode_type_at(&rest[1], ctx)?,
            })
        }
        "CustomTypeDefinition" => {
            let rest = arity(rest, 2, ctx, "[\"CustomTypeDefinition\", params, constructors]")?;
            let params = leaf(&rest[0], ctx, "a list of type parameter names")?;
            let constructors = decode_access_controlled(&rest[1], ctx, decode_constructors)?;
            Ok(TypeDefinition::CustomType {
                params,
                constructors,
            })
        }
        other => Err(CodecError::UnknownTag {
            context: ctx.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn decode_constructors(json: &Json, ctx: &str) -> Result<Vec<Constructor<()>>> {
    as_array(json, ctx)?
        .iter()
        .map(|entry| {
            let pair = as_array(entry, ctx)?;
            if pair.len() != 2 {
                return Err(shape(ctx, "a [name, args] constructor pair"));
            }
            let name: Name = leaf(&pair[0], ctx, "a constructor name")?;
            let cctx = format!("{ctx}.{}", name.to_camel_case());
            let args = as_array(&pair[1], &cctx)?
                .iter()
                .map(|arg| {
                    let arg = as_array(arg, &cctx)?;
                    if arg.len() != 2 {
                        return Err(shape(&cctx, "a [name, type] argument pair"));
                    }
                    let arg_name: Name = leaf(&arg[0], &cctx, "an argument name")?;
                    Ok((arg_name, decode_type_at(&arg[1], &cctx)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Constructor::new(name, args))
        })
        .collect()
}
