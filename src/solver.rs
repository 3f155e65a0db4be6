// solver.rs — optional Logic Solver backend (spec §4.6). An alternative
// resolver may replace the Traversal Engine by emitting a flat set of
// facts and consuming `ultimatePermission(...)` facts returned by an
// external declarative solver. This module specifies the fact shape and
// the mapping back to the data model; it does not bundle a solver
// runtime — the solver's own rules are out of scope (spec §1, §4.6).

use crate::model::{
    dedup_first_occurrence, default_permission_type, Address, AddressType, DiscoveredSnapshot,
    OverridesDocument, UltimateOwnerRecord, ViaStep,
};

/// Identifier form used at the fact boundary: `<chain>_<hex>` (colon
/// substituted by underscore, spec §6).
pub fn solver_id(address: &Address) -> String {
    format!("{}_{}", address.chain(), address.hex())
}

fn solver_address_type(t: AddressType) -> &'static str {
    match t {
        AddressType::Eoa | AddressType::EoaPermissioned => "eoa",
        AddressType::Multisig => "multisig",
        AddressType::Unknown => "unknown",
        _ => "contract",
    }
}

/// Emit the flat fact set described in spec §4.6/§6:
/// `permission(Receiver, "type", Giver, Delay, Description, "Role")`,
/// `address(Id, "chain", "qualified")`, `addressType(Id, kind)`,
/// `canActIndependently(Id)`.
pub fn emit_facts(overrides: &OverridesDocument, snapshot: &DiscoveredSnapshot) -> Vec<String> {
    let mut facts = Vec::new();
    let mut known_addresses = std::collections::BTreeSet::new();

    for (contract_address, contract) in overrides.iter() {
        known_addresses.insert(contract_address.clone());
        for function in &contract.functions {
            if !function.is_permissioned() {
                continue;
            }
            for def in &function.owner_definitions {
                let Ok(result) = crate::path::evaluate(&def.path, contract_address, snapshot)
                else {
                    continue;
                };
                for owner in &result.addresses {
                    known_addresses.insert(owner.clone());
                    let resolved_type = snapshot.address_type(owner);
                    let permission_type = def.effective_type(resolved_type);
                    let delay = function
                        .delay
                        .as_ref()
                        .and_then(|d| crate::delay::resolve_delay(d, snapshot).ok())
                        .unwrap_or(0);
                    let description = function.description.clone().unwrap_or_default();
                    facts.push(format!(
                        "permission({}, \"{}\", {}, {}, {:?}, \"\").",
                        solver_id(owner),
                        permission_type.as_wire_str(),
                        solver_id(contract_address),
                        delay,
                        description,
                    ));
                }
            }
        }
    }

    for address in &known_addresses {
        let ty = snapshot.address_type(address);
        facts.push(format!(
            "address({}, {:?}, {:?}).",
            solver_id(address),
            address.chain(),
            address.to_string()
        ));
        facts.push(format!("addressType({}, {}).", solver_id(address), solver_address_type(ty)));
        if default_permission_type(ty) == crate::model::PermissionType::Act {
            facts.push(format!("canActIndependently({}).", solver_id(address)));
        }
    }

    facts
}

/// One `ultimatePermission(...)` fact returned by the external solver,
/// already decoded from whatever wire format it used (spec §4.6):
/// `ultimatePermission(receiver, type, giver, _, _, role, _, totalDelay,
/// viaList, _)`.
#[derive(Debug, Clone)]
pub struct UltimatePermissionFact {
    pub receiver: Address,
    pub receiver_type: AddressType,
    /// Ordered via-chain, each with the cumulative per-step delay
    /// observed at that hop.
    pub via: Vec<(Address, AddressType, u64)>,
    pub total_delay: u64,
}

/// Map solver-returned facts back to `UltimateOwnerRecord`s, applying the
/// identical deduplication semantics used by the Traversal Engine
/// (spec §4.6).
pub fn map_solver_output(facts: Vec<UltimatePermissionFact>) -> Vec<UltimateOwnerRecord> {
    let mut records: Vec<UltimateOwnerRecord> = facts
        .into_iter()
        .map(|fact| {
            let via: Vec<ViaStep> = fact
                .via
                .into_iter()
                .map(|(address, address_type, delay)| ViaStep {
                    address,
                    address_type,
                    delay: if delay > 0 { Some(delay) } else { None },
                    delay_formatted: if delay > 0 {
                        Some(crate::model::format_delay(delay))
                    } else {
                        None
                    },
                })
                .collect();
            let delays: Vec<u64> = via.iter().filter_map(|s| s.delay).collect();
            UltimateOwnerRecord {
                address: fact.receiver,
                address_type: fact.receiver_type,
                via,
                delays,
                cumulative_delay: fact.total_delay,
                cumulative_delay_formatted: crate::model::format_delay(fact.total_delay),
            }
        })
        .collect();
    dedup_first_occurrence(&mut records);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_id_substitutes_colon_with_underscore() {
        let addr: Address = "eth:0xabcd".parse().unwrap();
        assert_eq!(solver_id(&addr), "eth_0xabcd");
    }

    #[test]
    fn map_solver_output_dedups_identical_terminal_and_via() {
        let receiver: Address = "eth:0xe1".parse().unwrap();
        let facts = vec![
            UltimatePermissionFact {
                receiver: receiver.clone(),
                receiver_type: AddressType::Eoa,
                via: vec![],
                total_delay: 0,
            },
            UltimatePermissionFact {
                receiver: receiver.clone(),
                receiver_type: AddressType::Eoa,
                via: vec![],
                total_delay: 0,
            },
        ];
        let records = map_solver_output(facts);
        assert_eq!(records.len(), 1);
    }
}
