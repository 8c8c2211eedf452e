// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Morphir IR JSON codec (format version 3).
//!
//! Variants are tagged arrays whose first element is the variant name and
//! whose second element is the attribute payload:
//!
//! ```text
//! ["Literal", [], ["StringLiteral", "hello"]]
//! ["Reference", [], [[["morphir"],["s","d","k"]],[["basics"]],["int"]], []]
//! ```
//!
//! Unit attributes are written as `[]` and ignored when reading.

mod distribution;
mod types;
mod value;

pub use distribution::{
    decode_distribution, decode_distribution_file_payload, encode_distribution,
    encode_distribution_file_payload,
};
pub use types::{decode_type, decode_type_definition, encode_type, encode_type_definition};
pub use value::{decode_value, decode_value_bytes, encode_value, encode_value_bytes};

use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use thiserror::Error;

/// Format version written by this codec.
pub const FORMAT_VERSION: u64 = 3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while decoding IR JSON.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{context}: expected {expected}")]
    UnexpectedShape {
        context: String,
        expected: &'static str,
    },

    #[error("{context}: unknown tag {tag:?}")]
    UnknownTag { context: String, tag: String },

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u64),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn shape(context: &str, expected: &'static str) -> CodecError {
    CodecError::UnexpectedShape {
        context: context.to_string(),
        expected,
    }
}

fn as_array<'a>(json: &'a Json, context: &str) -> Result<&'a [Json]> {
    json.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| shape(context, "an array"))
}

fn as_str<'a>(json: &'a Json, context: &str) -> Result<&'a str> {
    json.as_str().ok_or_else(|| shape(context, "a string"))
}

/// Split a tagged array into its tag and remaining elements.
fn tagged<'a>(json: &'a Json, context: &str) -> Result<(&'a str, &'a [Json])> {
    let items = as_array(json, context)?;
    let (tag, rest) = items
        .split_first()
        .ok_or_else(|| shape(context, "a non-empty tagged array"))?;
    Ok((as_str(tag, context)?, rest))
}

/// Require exactly `n` elements after the tag.
fn arity<'a>(rest: &'a [Json], n: usize, context: &str, expected: &'static str) -> Result<&'a [Json]> {
    if rest.len() != n {
        return Err(shape(context, expected));
    }
    Ok(rest)
}

/// Decode a serde-derived leaf (Name, Path, FQName) with context on failure.
fn leaf<T: DeserializeOwned>(json: &Json, context: &str, expected: &'static str) -> Result<T> {
    serde_json::from_value(json.clone()).map_err(|_| shape(context, expected))
}

fn leaf_json<T: serde::Serialize>(value: &T) -> Json {
    serde_json::to_value(value).unwrap_or(Json::Null)
}

fn unit_attr() -> Json {
    Json::Array(Vec::new())
}

fn tag(name: &str) -> Json {
    Json::String(name.to_string())
}
