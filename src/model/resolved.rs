// model/resolved.rs — the results the Traversal Engine emits, and the
// on-disk Resolved document shape (spec §3, §6).

use super::address::{Address, AddressType};
use super::field_value::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One intermediate contract stepped through on the way to an ultimate
/// owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViaStep {
    pub address: Address,
    pub address_type: AddressType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_formatted: Option<String>,
}

/// A direct owner: either a resolved address (optionally carrying a
/// preserved structured value, spec §4.1 rule 4) or a resolution failure.
///
/// `address` is the wire form (the `RESOLUTION_FAILED` placeholder when
/// unresolved); `resolved_address` carries the same value already parsed
/// back into an `Address` so downstream traversal never has to reparse
/// (and never panics on) a string it just produced itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectOwner {
    pub address: String,
    pub is_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip)]
    pub resolved_address: Option<Address>,
}

/// Placeholder address used for unresolved owners (spec §4.2).
pub const RESOLUTION_FAILED: &str = "RESOLUTION_FAILED";

impl DirectOwner {
    pub fn resolved(address: Address, structured: Option<FieldValue>, source_path: &str) -> Self {
        Self {
            address: address.to_string(),
            is_resolved: true,
            structured,
            source_path: Some(source_path.to_string()),
            resolved_address: Some(address),
        }
    }

    pub fn failed(source_path: &str) -> Self {
        Self {
            address: RESOLUTION_FAILED.to_string(),
            is_resolved: false,
            structured: None,
            source_path: Some(source_path.to_string()),
            resolved_address: None,
        }
    }
}

/// A terminal principal reached via the ownership graph, plus the path
/// taken and the cumulative delay (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UltimateOwnerRecord {
    pub address: Address,
    pub address_type: AddressType,
    pub via: Vec<ViaStep>,
    pub delays: Vec<u64>,
    pub cumulative_delay: u64,
    pub cumulative_delay_formatted: String,
}

impl UltimateOwnerRecord {
    /// Deduplication key: terminal address + the sequence of via
    /// addresses (spec §3, invariant 5).
    pub fn dedup_key(&self) -> (Address, Vec<Address>) {
        (
            self.address.clone(),
            self.via.iter().map(|s| s.address.clone()).collect(),
        )
    }
}

/// Keep the first record for each `(terminal, via-address-sequence)` key,
/// preserving order of first appearance (spec §3, §4.5). Shared by the
/// Traversal Engine and the Logic Solver output mapper (§4.6) so both
/// backends apply identical dedup semantics.
pub fn dedup_first_occurrence(records: &mut Vec<UltimateOwnerRecord>) {
    let mut seen = std::collections::HashSet::new();
    records.retain(|r| seen.insert(r.dedup_key()));
}

/// Format a delay in seconds as `"Xd Yh Zm Ws"`, omitting zero
/// components, `"0s"` if the whole thing is zero (spec §4.5).
pub fn format_delay(total_seconds: u64) -> String {
    if total_seconds == 0 {
        return "0s".to_string();
    }
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

/// The resolved results for one permissioned function.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFunction {
    pub function_name: String,
    pub direct_owners: Vec<DirectOwner>,
    pub ultimate_owners: Vec<UltimateOwnerRecord>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedContract {
    pub functions: Vec<ResolvedFunction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFrom {
    #[serde(rename = "permissionOverridesVersion")]
    pub permission_overrides_version: String,
    #[serde(rename = "discoveredJsonHash")]
    pub discovered_json_hash: String,
}

/// The full resolved output document (spec §6). Only contracts with at
/// least one permissioned function resolved are included.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDocument {
    pub version: String,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
    #[serde(rename = "generatedFrom")]
    pub generated_from: GeneratedFrom,
    pub contracts: BTreeMap<Address, ResolvedContract>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_delay_zero_is_0s() {
        assert_eq!(format_delay(0), "0s");
    }

    #[test]
    fn format_delay_one_day() {
        assert_eq!(format_delay(86_400), "1d");
    }

    #[test]
    fn format_delay_mixed_components() {
        // 1 day, 2 hours, 3 minutes, 4 seconds
        let secs = 86_400 + 2 * 3_600 + 3 * 60 + 4;
        assert_eq!(format_delay(secs), "1d 2h 3m 4s");
    }

    #[test]
    fn format_delay_omits_zero_components() {
        assert_eq!(format_delay(3_600), "1h");
        assert_eq!(format_delay(90), "1m 30s");
    }
}
