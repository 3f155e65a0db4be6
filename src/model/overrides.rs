// model/overrides.rs — the curator-authored catalogue of permissioned
// functions and their declared owners (spec §3, §6).

use super::address::{Address, AddressType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of permission-type tags (spec §3). Only `Act` chains
/// transitively in the Logic Solver's declarative rules; `Admin` is a
/// non-transitive administrative edge there. The Traversal Engine (§4.5)
/// does not gate recursion on this tag — see DESIGN.md for why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionType {
    Member,
    Act,
    Admin,
    Interact,
    Upgrade,
    Challenge,
    Guard,
    Propose,
    Sequence,
    Validate,
    Disperse,
    #[serde(rename = "relayDA")]
    RelayDa,
    OperateLinea,
    Fastconfirm,
    Configure,
    Whitelist,
}

/// Default permission type when an OwnerDefinition omits one (spec §3):
/// `act` if the resolved owner's AddressType is `EOA`, `EOAPermissioned`,
/// or `Multisig`; otherwise `admin`. Unknown defaults to `act` (Open
/// Question (c) — see DESIGN.md).
pub fn default_permission_type(resolved: AddressType) -> PermissionType {
    match resolved {
        AddressType::Eoa | AddressType::EoaPermissioned | AddressType::Multisig => {
            PermissionType::Act
        }
        AddressType::Unknown => PermissionType::Act,
        _ => PermissionType::Admin,
    }
}

/// A single path expression plus its optional permission-type tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerDefinition {
    pub path: String,
    #[serde(rename = "permissionType", skip_serializing_if = "Option::is_none")]
    pub permission_type: Option<PermissionType>,
}

impl PermissionType {
    /// The exact wire string for this tag (spec §3), used by the Logic
    /// Solver fact emitter (§4.6) rather than relying on Rust's `Debug`
    /// casing.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            PermissionType::Member => "member",
            PermissionType::Act => "act",
            PermissionType::Admin => "admin",
            PermissionType::Interact => "interact",
            PermissionType::Upgrade => "upgrade",
            PermissionType::Challenge => "challenge",
            PermissionType::Guard => "guard",
            PermissionType::Propose => "propose",
            PermissionType::Sequence => "sequence",
            PermissionType::Validate => "validate",
            PermissionType::Disperse => "disperse",
            PermissionType::RelayDa => "relayDA",
            PermissionType::OperateLinea => "operateLinea",
            PermissionType::Fastconfirm => "fastconfirm",
            PermissionType::Configure => "configure",
            PermissionType::Whitelist => "whitelist",
        }
    }
}

impl OwnerDefinition {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), permission_type: None }
    }

    pub fn effective_type(&self, resolved: AddressType) -> PermissionType {
        self.permission_type.unwrap_or_else(|| default_permission_type(resolved))
    }
}

/// Pointer to a numeric field to be read from the Discovered Store at
/// resolution time (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRef {
    pub contract_address: Address,
    pub field_name: String,
}

/// Closed risk-score set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskScore {
    Unscored,
    LowRisk,
    MediumRisk,
    HighRisk,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Permissioned,
    #[serde(rename = "non-permissioned")]
    NonPermissioned,
}

/// One curated permissioned/non-permissioned function on a contract.
/// Invariant: a `(contractAddress, functionName)` pair appears at most
/// once within an `OverridesDocument`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOverride {
    pub function_name: String,
    pub user_classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub owner_definitions: Vec<OwnerDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<DelayRef>,
    pub timestamp: DateTime<Utc>,
}

impl FunctionOverride {
    pub fn is_permissioned(&self) -> bool {
        self.user_classification == Classification::Permissioned
    }
}

/// Functions declared for one contract address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractOverrides {
    pub functions: Vec<FunctionOverride>,
}

/// The full curator catalogue: contractAddress -> ordered function list
/// (spec §3, §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverridesDocument {
    pub version: String,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
    pub contracts: BTreeMap<Address, ContractOverrides>,
}

impl OverridesDocument {
    /// Iterate contracts in document order (BTreeMap iteration order —
    /// stable, deterministic; matches the "OverridesDocument iteration
    /// order" ordering guarantee in spec §5).
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &ContractOverrides)> {
        self.contracts.iter()
    }

    pub fn get(&self, address: &Address) -> Option<&ContractOverrides> {
        self.contracts.get(address)
    }
}
