// traversal.rs — Traversal Engine (spec §4.5): branching DFS from each
// direct owner, respecting termination rules, cycle rules, and delay
// accumulation, emitting deduplicated ultimate-owner records.

use crate::delay::resolve_delay;
use crate::graph::OwnershipGraph;
use crate::model::{
    dedup_first_occurrence, format_delay, Address, AddressType, DiscoveredSnapshot,
    FunctionOverride, ResolvedFunction, UltimateOwnerRecord, ViaStep,
};
use crate::owner::resolve_owners;
use std::collections::HashSet;

/// Resolve one permissioned function: direct owners plus, for each, the
/// deduplicated ultimate owners reached by tracing the ownership graph.
pub fn resolve_function(
    self_address: &Address,
    function: &FunctionOverride,
    snapshot: &DiscoveredSnapshot,
    graph: &OwnershipGraph,
) -> ResolvedFunction {
    let mut warnings = Vec::new();
    let direct_owners =
        resolve_owners(&function.owner_definitions, self_address, snapshot, &mut warnings);

    let mut ultimate_owners: Vec<UltimateOwnerRecord> = Vec::new();
    for addr in direct_owners.iter().filter_map(|o| o.resolved_address.as_ref()) {
        let records = trace(addr, &HashSet::new(), &[], &[], snapshot, graph, &mut warnings);
        ultimate_owners.extend(records);
    }

    dedup_first_occurrence(&mut ultimate_owners);

    ResolvedFunction {
        function_name: function.function_name.clone(),
        direct_owners,
        ultimate_owners,
        warnings,
    }
}

/// Recursive DFS step. `visited` holds every address already on *this*
/// branch; `via`/`delays` are the accumulated path and per-step delays.
fn trace(
    current: &Address,
    visited: &HashSet<Address>,
    via: &[ViaStep],
    delays: &[u64],
    snapshot: &DiscoveredSnapshot,
    graph: &OwnershipGraph,
    warnings: &mut Vec<String>,
) -> Vec<UltimateOwnerRecord> {
    if visited.contains(current) {
        warnings.push(cycle_message(via, current));
        return Vec::new();
    }

    let address_type = snapshot.address_type(current);

    if address_type.is_terminal() {
        return vec![finish(current.clone(), address_type, via, delays)];
    }

    let node = match graph.get(current) {
        Some(node) if !node.owner_definitions.is_empty() => node,
        _ => return vec![finish(current.clone(), address_type, via, delays)],
    };

    let step_delay = node
        .delay_refs
        .iter()
        .filter_map(|r| resolve_delay(r, snapshot).ok())
        .filter(|&d| d > 0)
        .max()
        .unwrap_or(0);

    let mut next_visited = visited.clone();
    next_visited.insert(current.clone());

    let mut next_via = via.to_vec();
    next_via.push(ViaStep {
        address: current.clone(),
        address_type,
        delay: if step_delay > 0 { Some(step_delay) } else { None },
        delay_formatted: if step_delay > 0 { Some(format_delay(step_delay)) } else { None },
    });

    let mut next_delays = delays.to_vec();
    if step_delay > 0 {
        next_delays.push(step_delay);
    }

    let mut owner_warnings = Vec::new();
    let owners = resolve_owners(&node.owner_definitions, current, snapshot, &mut owner_warnings);
    warnings.extend(owner_warnings);

    let mut out = Vec::new();
    for addr in owners.iter().filter_map(|o| o.resolved_address.as_ref()) {
        out.extend(trace(addr, &next_visited, &next_via, &next_delays, snapshot, graph, warnings));
    }
    out
}

fn finish(
    address: Address,
    address_type: AddressType,
    via: &[ViaStep],
    delays: &[u64],
) -> UltimateOwnerRecord {
    let cumulative_delay: u64 = delays.iter().sum();
    UltimateOwnerRecord {
        address,
        address_type,
        via: via.to_vec(),
        delays: delays.to_vec(),
        cumulative_delay,
        cumulative_delay_formatted: format_delay(cumulative_delay),
    }
}

fn cycle_message(via: &[ViaStep], current: &Address) -> String {
    let start = via.iter().position(|s| &s.address == current).unwrap_or(0);
    let mut chain: Vec<String> = via[start..].iter().map(|s| s.address.to_string()).collect();
    chain.push(current.to_string());
    format!("Cycle detected: {}", chain.join(" → "))
}
