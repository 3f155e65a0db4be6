// resolve.rs — top-level orchestration (spec §3, §5): wires the curator
// catalogue and a discovered snapshot through the Ownership Graph and
// Traversal Engine into a Resolved document. Pure with respect to I/O;
// the store layer handles reading/writing the documents this consumes
// and produces.

use crate::graph::OwnershipGraph;
use crate::model::{GeneratedFrom, OverridesDocument, ResolvedContract, ResolvedDocument};
use crate::traversal::resolve_function;
use chrono::Utc;
use std::collections::BTreeMap;

/// Resolve every permissioned function in `overrides` against `snapshot`,
/// producing the Resolved document. Contracts with no permissioned
/// function are omitted entirely (spec §3).
pub fn run(
    overrides: &OverridesDocument,
    snapshot: &crate::model::DiscoveredSnapshot,
    discovered_json_hash: &str,
) -> ResolvedDocument {
    let graph = OwnershipGraph::build(overrides);
    let mut contracts = BTreeMap::new();

    for (contract_address, contract) in overrides.iter() {
        let permissioned: Vec<_> = contract.functions.iter().filter(|f| f.is_permissioned()).collect();
        if permissioned.is_empty() {
            continue;
        }

        let functions = permissioned
            .into_iter()
            .map(|function| resolve_function(contract_address, function, snapshot, &graph))
            .collect();

        contracts.insert(contract_address.clone(), ResolvedContract { functions });
    }

    ResolvedDocument {
        version: overrides.version.clone(),
        last_modified: Utc::now(),
        generated_from: GeneratedFrom {
            permission_overrides_version: overrides.version.clone(),
            discovered_json_hash: discovered_json_hash.to_string(),
        },
        contracts,
    }
}
