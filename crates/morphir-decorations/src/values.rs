// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoration payloads and per-kind value snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use morphir_ir::{codec, CodecError, NodePath, Value};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

// ---------------------------------------------------------------------------
// DecorationValue
// ---------------------------------------------------------------------------

/// An encoded IR value attached to one node for one decoration kind.
///
/// The payload is validated JSON text held behind an immutable shared
/// buffer: clones share storage, and nothing can write through them.
/// [`to_bytes`](Self::to_bytes) hands out an owned copy.
#[derive(Clone)]
pub struct DecorationValue(Arc<RawValue>);

impl DecorationValue {
    /// Wrap JSON text, rejecting malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw = RawValue::from_string(json.to_string())?;
        Ok(Self(Arc::from(raw)))
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw = serde_json::value::to_raw_value(json)?;
        Ok(Self(Arc::from(raw)))
    }

    /// Encode an IR value.
    pub fn encode(value: &Value<()>) -> Result<Self, serde_json::Error> {
        Self::from_json(&codec::encode_value(value))
    }

    /// Decode the payload as an IR value.
    pub fn decode(&self) -> Result<Value<()>, CodecError> {
        codec::decode_value_bytes(self.as_str().as_bytes())
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Owned copy of the payload bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_str().as_bytes().to_vec()
    }
}

impl PartialEq for DecorationValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for DecorationValue {}

impl fmt::Debug for DecorationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecorationValue").field(&self.as_str()).finish()
    }
}

impl fmt::Display for DecorationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DecorationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawValue::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for DecorationValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self(Arc::from(raw)))
    }
}

// ---------------------------------------------------------------------------
// DecorationValues
// ---------------------------------------------------------------------------

/// Snapshot of one decoration kind's values, keyed by node path string.
///
/// Keys are stored as given; lookups use the node's canonical string.
/// [`load_decoration_values`](crate::load_decoration_values) canonicalizes
/// keys read from disk. Updates return a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationValues {
    values: BTreeMap<String, DecorationValue>,
}

impl DecorationValues {
    pub fn new(values: BTreeMap<String, DecorationValue>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &NodePath) -> Option<DecorationValue> {
        self.values.get(&node.to_string()).cloned()
    }

    pub fn has(&self, node: &NodePath) -> bool {
        self.values.contains_key(&node.to_string())
    }

    /// Copy of every entry.
    pub fn all(&self) -> BTreeMap<String, DecorationValue> {
        self.values.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecorationValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn with_value(&self, node: &NodePath, value: DecorationValue) -> Self {
        let mut values = self.values.clone();
        values.insert(node.to_string(), value);
        Self { values }
    }

    pub fn without_value(&self, node: &NodePath) -> Self {
        let mut values = self.values.clone();
        values.remove(&node.to_string());
        Self { values }
    }
}

impl FromIterator<(String, DecorationValue)> for DecorationValues {
    fn from_iter<I: IntoIterator<Item = (String, DecorationValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(s: &str) -> NodePath {
        s.parse().unwrap()
    }

    fn unit() -> DecorationValue {
        DecorationValue::from_json_str(r#"["Unit",[]]"#).unwrap()
    }

    #[test]
    fn test_rejects_malformed_payload() {
        assert!(DecorationValue::from_json_str("{oops").is_err());
    }

    #[test]
    fn test_all_reconstructs_input() {
        let mut input = BTreeMap::new();
        input.insert("My.Package:Foo:bar".to_string(), unit());
        input.insert("My.Package:Foo".to_string(), unit());
        let values = DecorationValues::new(input.clone());
        assert_eq!(values.all(), input);
        assert_eq!(values.count(), 2);
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let base = DecorationValues::empty();
        let updated = base.with_value(&node("My.Package:Foo:bar"), unit());
        assert!(base.is_empty());
        assert!(updated.has(&node("My.Package:Foo:bar")));

        let removed = updated.without_value(&node("My.Package:Foo:bar"));
        assert!(removed.is_empty());
        assert_eq!(updated.count(), 1);
    }

    #[test]
    fn test_copied_bytes_are_detached() {
        let values = DecorationValues::empty().with_value(&node("A:B:c"), unit());
        let mut bytes = values.get(&node("A:B:c")).unwrap().to_bytes();
        bytes[0] = b'X';
        assert_eq!(values.get(&node("A:B:c")).unwrap().as_str(), r#"["Unit",[]]"#);
    }

    #[test]
    fn test_lookup_uses_canonical_string() {
        let values = DecorationValues::empty().with_value(&node("my.package:foo:Bar"), unit());
        assert!(values.has(&node("My.Package:Foo:bar")));
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(unit().decode().unwrap(), Value::Unit(()));
    }
}
