// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde_json::{json, Value as Json};

use super::{arity, as_array, as_str, leaf, leaf_json, shape, tag, tagged, unit_attr, CodecError, Result};
use crate::literal::Literal;
use crate::name::Name;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Literal
// ---------------------------------------------------------------------------

fn encode_literal(lit: &Literal) -> Json {
    let payload = match lit {
        Literal::Bool(b) => json!(b),
        Literal::Char(c) => json!(c.to_string()),
        Literal::String(s) => json!(s),
        Literal::WholeNumber(n) => json!(n),
        Literal::Float(f) => json!(f),
        Literal::Decimal(d) => json!(d),
    };
    json!([tag(lit.tag()), payload])
}

fn decode_literal(json: &Json, ctx: &str) -> Result<Literal> {
    let (t, rest) = tagged(json, ctx)?;
    let rest = arity(rest, 1, ctx, "a [tag, payload] literal")?;
    let payload = &rest[0];
    match t {
        "BoolLiteral" => payload
            .as_bool()
            .map(Literal::Bool)
            .ok_or_else(|| shape(ctx, "a boolean")),
        "CharLiteral" => {
            let s = as_str(payload, ctx)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Literal::Char(c)),
                _ => Err(shape(ctx, "a single character")),
            }
        }
        "StringLiteral" => Ok(Literal::String(as_str(payload, ctx)?.to_string())),
        "WholeNumberLiteral" => payload
            .as_i64()
            .map(Literal::WholeNumber)
            .ok_or_else(|| shape(ctx, "an integer")),
        "FloatLiteral" => payload
            .as_f64()
            .map(Literal::Float)
            .ok_or_else(|| shape(ctx, "a number")),
        "DecimalLiteral" => match payload {
            Json::String(s) => Ok(Literal::Decimal(s.clone())),
            Json::Number(n) => Ok(Literal::Decimal(n.to_string())),
            _ => Err(shape(ctx, "a decimal string")),
        },
        other => Err(CodecError::UnknownTag {
            context: ctx.to_string(),
            tag: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

pub fn encode_value(value: &Value<()>) -> Json {
    match value {
        Value::Literal((), lit) => json!([tag("Literal"), unit_attr(), encode_literal(lit)]),
        Value::Constructor((), fqname) => {
            json!([tag("Constructor"), unit_attr(), leaf_json(fqname)])
        }
        Value::Tuple((), elems) => json!([tag("Tuple"), unit_attr(), encode_values(elems)]),
        Value::List((), items) => json!([tag("List"), unit_attr(), encode_values(items)]),
        Value::Record((), fields) => {
            let fields: Vec<Json> = fields
                .iter()
                .map(|(n, v)| json!([leaf_json(n), encode_value(v)]))
                .collect();
            json!([tag("Record"), unit_attr(), fields])
        }
        Value::Variable((), name) => json!([tag("Variable"), unit_attr(), leaf_json(name)]),
        Value::Reference((), fqname) => {
            json!([tag("Reference"), unit_attr(), leaf_json(fqname)])
        }
        Value::Apply((), function, arg) => json!([
            tag("Apply"),
            unit_attr(),
            encode_value(function),
            encode_value(arg)
        ]),
        Value::Unit(()) => json!([tag("Unit"), unit_attr()]),
    }
}

fn encode_values(values: &[Value<()>]) -> Json {
    Json::Array(values.iter().map(encode_value).collect())
}

/// Encode to compact JSON bytes.
pub fn encode_value_bytes(value: &Value<()>) -> Vec<u8> {
    encode_value(value).to_string().into_bytes()
}

pub fn decode_value(json: &Json) -> Result<Value<()>> {
    decode_value_at(json, "value")
}

/// Decode from JSON bytes.
pub fn decode_value_bytes(bytes: &[u8]) -> Result<Value<()>> {
    let json: Json = serde_json::from_slice(bytes)?;
    decode_value(&json)
}

fn decode_value_at(json: &Json, ctx: &str) -> Result<Value<()>> {
    let (t, rest) = tagged(json, ctx)?;
    match t {
        "Literal" => {
            let rest = arity(rest, 2, ctx, "[\"Literal\", attrs, literal]")?;
            Ok(Value::Literal((), decode_literal(&rest[1], ctx)?))
        }
        "Constructor" => {
            let rest = arity(rest, 2, ctx, "[\"Constructor\", attrs, fqname]")?;
            Ok(Value::Constructor((), leaf(&rest[1], ctx, "a fully-qualified name")?))
        }
        "Tuple" => {
            let rest = arity(rest, 2, ctx, "[\"Tuple\", attrs, elements]")?;
            Ok(Value::Tuple((), decode_values(&rest[1], ctx)?))
        }
        "List" => {
            let rest = arity(rest, 2, ctx, "[\"List\", attrs, items]")?;
            Ok(Value::List((), decode_values(&rest[1], ctx)?))
        }
        "Record" => {
            let rest = arity(rest, 2, ctx, "[\"Record\", attrs, fields]")?;
            let fields = as_array(&rest[1], ctx)?
                .iter()
                .map(|entry| {
                    let pair = as_array(entry, ctx)?;
                    if pair.len() != 2 {
                        return Err(shape(ctx, "a [name, value] field pair"));
                    }
                    let name: Name = leaf(&pair[0], ctx, "a field name")?;
                    let fctx = format!("{ctx}.{}", name.to_camel_case());
                    Ok((name, decode_value_at(&pair[1], &fctx)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Record((), fields))
        }
        "Variable" => {
            let rest = arity(rest, 2, ctx, "[\"Variable\", attrs, name]")?;
            Ok(Value::Variable((), leaf(&rest[1], ctx, "a name")?))
        }
        "Reference" => {
            let rest = arity(rest, 2, ctx, "[\"Reference\", attrs, fqname]")?;
            Ok(Value::Reference((), leaf(&rest[1], ctx, "a fully-qualified name")?))
        }
        "Apply" => {
            let rest = arity(rest, 3, ctx, "[\"Apply\", attrs, function, argument]")?;
            Ok(Value::Apply(
                (),
                Box::new(decode_value_at(&rest[1], &format!("{ctx}.function"))?),
                Box::new(decode_value_at(&rest[2], &format!("{ctx}.argument"))?),
            ))
        }
        "Unit" => {
            arity(rest, 1, ctx, "[\"Unit\", attrs]")?;
            Ok(Value::Unit(()))
        }
        other => Err(CodecError::UnknownTag {
            context: ctx.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn decode_values(json: &Json, ctx: &str) -> Result<Vec<Value<()>>> {
    as_array(json, ctx)?
        .iter()
        .enumerate()
        .map(|(i, v)| decode_value_at(v, &format!("{ctx}[{i}]")))
        .collect()
}
