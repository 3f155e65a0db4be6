// model/discovered.rs — the read-only snapshot of a project's on-chain
// state (spec §3).

use super::address::{Address, AddressType};
use super::field_value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single named field on a discovered entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// One discovered contract, EOA, or multisig.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredEntry {
    pub address: Address,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Legacy ad-hoc values map, consulted before `fields` (spec §4.1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<BTreeMap<String, FieldValue>>,
}

impl DiscoveredEntry {
    /// Field lookup order per spec §4.1: `values.<name>` first, then the
    /// `fields` sequence searching by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        if let Some(values) = &self.values {
            if let Some(v) = values.get(name) {
                return Some(v);
            }
        }
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// A project's discovered on-chain state, keyed by address (spec §3).
/// Invariant: addresses are unique within a snapshot.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSnapshot {
    entries: BTreeMap<Address, DiscoveredEntry>,
    /// 16-hex-char prefix of SHA-256 of the file as stored; provenance
    /// stamp only, not used in resolution logic.
    pub content_hash: String,
}

impl DiscoveredSnapshot {
    pub fn new(entries: Vec<DiscoveredEntry>, content_hash: String) -> Self {
        let entries = entries.into_iter().map(|e| (e.address.clone(), e)).collect();
        Self { entries, content_hash }
    }

    pub fn get(&self, address: &Address) -> Option<&DiscoveredEntry> {
        self.entries.get(address)
    }

    pub fn address_type(&self, address: &Address) -> AddressType {
        self.entries
            .get(address)
            .map(|e| e.address_type)
            .unwrap_or(AddressType::Unknown)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk shape of the discovered document (spec §6).
#[derive(Debug, Deserialize)]
pub struct DiscoveredDocument {
    pub entries: Vec<DiscoveredEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(addr: &str, ty: AddressType, fields: Vec<(&str, FieldValue)>) -> DiscoveredEntry {
        DiscoveredEntry {
            address: addr.parse().unwrap(),
            address_type: ty,
            name: None,
            fields: fields
                .into_iter()
                .map(|(n, v)| Field { name: n.to_string(), value: v })
                .collect(),
            values: None,
        }
    }

    #[test]
    fn field_lookup_prefers_values_map_over_fields() {
        let mut e = entry(
            "eth:0x1",
            AddressType::Contract,
            vec![("admin", FieldValue::string("from-fields"))],
        );
        let mut values = BTreeMap::new();
        values.insert("admin".to_string(), FieldValue::string("from-values"));
        e.values = Some(values);
        assert_eq!(
            e.field("admin"),
            Some(&FieldValue::string("from-values"))
        );
    }

    #[test]
    fn unknown_address_has_unknown_type() {
        let snap = DiscoveredSnapshot::new(vec![], "abc".to_string());
        assert_eq!(
            snap.address_type(&"eth:0xdead".parse().unwrap()),
            AddressType::Unknown
        );
    }
}
