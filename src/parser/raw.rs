//! Order- and duplicate-preserving intermediate parse tree.
//!
//! `serde_json::Map` silently drops duplicate keys, which is exactly the
//! shadowing behavior the document format forbids. [`RawNode`] keeps
//! every map entry in source order so the conversion pass can reject
//! duplicates with a proper error instead of inheriting last-write-wins.

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A parsed value that keeps map entries ordered and duplicated.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawNode {
    /// An object: every entry, in source order, duplicates included
    Map(Vec<(String, RawNode)>),
    /// Any non-object value
    Value(serde_json::Value),
}

impl RawNode {
    /// Returns the map entries, or None for non-object values.
    pub(crate) fn as_map(&self) -> Option<&[(String, RawNode)]> {
        match self {
            Self::Map(pairs) => Some(pairs),
            Self::Value(_) => None,
        }
    }

    /// Converts back into a plain JSON value (last-wins on duplicates);
    /// used for payloads that are passed through verbatim.
    pub(crate) fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Map(pairs) => {
                let mut map = serde_json::Map::new();
                for (key, value) in pairs {
                    map.insert(key.clone(), value.to_value());
                }
                serde_json::Value::Object(map)
            }
            Self::Value(value) => value.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON5 value")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<RawNode>()?;
            pairs.push((key, value));
        }
        Ok(RawNode::Map(pairs))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<serde_json::Value>()? {
            items.push(item);
        }
        Ok(RawNode::Value(serde_json::Value::Array(items)))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::String(value.to_string())))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::String(value)))
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::Bool(value)))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::from(value)))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::from(value)))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::from(value)))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::Null))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawNode::Value(serde_json::Value::Null))
    }
}
