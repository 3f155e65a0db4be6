// model/mod.rs — the data model shared by every component (spec §3).

pub mod address;
pub mod discovered;
pub mod field_value;
pub mod overrides;
pub mod resolved;

pub use address::{Address, AddressType};
pub use discovered::{DiscoveredDocument, DiscoveredEntry, DiscoveredSnapshot, Field};
pub use field_value::FieldValue;
pub use overrides::{
    default_permission_type, Classification, ContractOverrides, DelayRef, FunctionOverride,
    OverridesDocument, OwnerDefinition, PermissionType, RiskScore,
};
pub use resolved::{
    dedup_first_occurrence, format_delay, DirectOwner, GeneratedFrom, ResolvedContract,
    ResolvedDocument, ResolvedFunction, UltimateOwnerRecord, ViaStep, RESOLUTION_FAILED,
};
