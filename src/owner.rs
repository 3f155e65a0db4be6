// owner.rs — Owner Resolver (spec §4.2): turns a function's ordered list
// of OwnerDefinitions into direct owners, recording per-owner
// success/failure. No side effects beyond reading the snapshot.

use crate::model::{Address, DirectOwner, DiscoveredSnapshot, OwnerDefinition};
use crate::path;

/// Resolve every `OwnerDefinition` on a function, in input order.
/// Concatenates the per-definition results.
pub fn resolve_owners(
    owner_definitions: &[OwnerDefinition],
    self_address: &Address,
    snapshot: &DiscoveredSnapshot,
    warnings: &mut Vec<String>,
) -> Vec<DirectOwner> {
    let mut out = Vec::new();
    for def in owner_definitions {
        match path::evaluate(&def.path, self_address, snapshot) {
            Err(err) => {
                warnings.push(format!("owner path {:?} failed: {}", def.path, err));
                out.push(DirectOwner::failed(&def.path));
            }
            Ok(result) => {
                for addr in result.addresses {
                    out.push(DirectOwner::resolved(addr, result.structured.clone(), &def.path));
                }
            }
        }
    }
    out
}
