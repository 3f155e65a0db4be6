// model/field_value.rs — the heterogeneous value tree the Path Evaluator
// descends (spec §3, §9).

use super::address::{Address, AddressType};
use serde::{Deserialize, Serialize};

/// A recursively tagged value. `number` carries a decimal string rather
/// than a machine integer because discovered values may exceed 64 bits
/// (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldValue {
    Address {
        address: Address,
        #[serde(rename = "addressType", skip_serializing_if = "Option::is_none")]
        address_type: Option<AddressType>,
    },
    Hex {
        value: String,
    },
    String {
        value: String,
    },
    Number {
        value: String,
    },
    Boolean {
        value: bool,
    },
    Array {
        values: Vec<FieldValue>,
    },
    /// Key order follows the source document (spec §4.1: "addresses
    /// preserves document order"); a sorted map would reorder
    /// nested-address results whenever keys aren't already alphabetical
    /// (e.g. a role table with `PAUSER_ROLE` before `ADMIN_ROLE`).
    Object {
        #[serde(with = "ordered_object")]
        values: Vec<(String, FieldValue)>,
    },
    Unknown,
    Error {
        message: String,
    },
}

/// (De)serializes `Vec<(String, FieldValue)>` as a JSON object while
/// preserving insertion/document order, since `serde_json`'s map visitor
/// already yields entries in source order — only a sorted container
/// (e.g. `BTreeMap`) would lose it.
mod ordered_object {
    use super::FieldValue;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(values: &[(String, FieldValue)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(values.len()))?;
        for (k, v) in values {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }

    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, FieldValue)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((k, v)) = map.next_entry::<String, FieldValue>()? {
                out.push((k, v));
            }
            Ok(out)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, FieldValue)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedVisitor)
    }
}

impl FieldValue {
    pub fn address(addr: Address, address_type: Option<AddressType>) -> Self {
        FieldValue::Address { address: addr, address_type }
    }

    pub fn number(decimal: impl Into<String>) -> Self {
        FieldValue::Number { value: decimal.into() }
    }

    pub fn string(s: impl Into<String>) -> Self {
        FieldValue::String { value: s.into() }
    }

    pub fn array(values: Vec<FieldValue>) -> Self {
        FieldValue::Array { values }
    }

    /// Build an object node from ordered key/value pairs; the order
    /// given is preserved through traversal and (de)serialization.
    pub fn object(values: Vec<(String, FieldValue)>) -> Self {
        FieldValue::Object { values }
    }

    /// If this node is itself an address, return it.
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            FieldValue::Address { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Recursively collect every address leaf beneath (and including) this
    /// node, in document order (spec §4.1 rule 4).
    pub fn collect_addresses(&self, out: &mut Vec<Address>) {
        match self {
            FieldValue::Address { address, .. } => out.push(address.clone()),
            FieldValue::Array { values } => {
                for v in values {
                    v.collect_addresses(out);
                }
            }
            FieldValue::Object { values } => {
                for (_, v) in values {
                    v.collect_addresses(out);
                }
            }
            _ => {}
        }
    }

    /// Look up a key inside an object-like node. Role tables and plain
    /// objects are both represented as `Object`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Object { values } => values.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Index into an array-like node.
    pub fn index(&self, i: usize) -> Option<&FieldValue> {
        match self {
            FieldValue::Array { values } => values.get(i),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, FieldValue::Array { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self, FieldValue::Object { .. })
    }
}
