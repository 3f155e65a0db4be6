// graph.rs — Ownership Graph (spec §4.4): a read-only projection of the
// Overrides Store mapping each contract to the union of owner
// definitions and delay references across all its permissioned
// functions. Built fresh per resolution run; holds no references into
// the original OverridesDocument past construction.

use crate::model::{Address, DelayRef, OverridesDocument, OwnerDefinition};
use std::collections::{BTreeMap, HashSet};

/// The owner definitions and delay references declared across every
/// permissioned function on one contract.
#[derive(Debug, Clone, Default)]
pub struct GraphNode {
    pub owner_definitions: Vec<OwnerDefinition>,
    pub delay_refs: Vec<DelayRef>,
}

/// Derived, in-memory projection of the curator catalogue (spec §3,
/// §4.4).
#[derive(Debug, Clone, Default)]
pub struct OwnershipGraph {
    nodes: BTreeMap<Address, GraphNode>,
}

impl OwnershipGraph {
    /// Build the graph in a single pass over the overrides document.
    /// Contracts with zero permissioned functions are still present with
    /// an empty node, distinguishing "no data" from "not present" (spec
    /// §4.4).
    pub fn build(overrides: &OverridesDocument) -> Self {
        let mut nodes = BTreeMap::new();
        for (address, contract) in overrides.iter() {
            let mut node = GraphNode::default();
            let mut seen_delay_refs = HashSet::new();
            for function in &contract.functions {
                if !function.is_permissioned() {
                    continue;
                }
                node.owner_definitions.extend(function.owner_definitions.iter().cloned());
                if let Some(delay_ref) = &function.delay {
                    if seen_delay_refs.insert(delay_ref.clone()) {
                        node.delay_refs.push(delay_ref.clone());
                    }
                }
            }
            nodes.insert(address.clone(), node);
        }
        Self { nodes }
    }

    pub fn get(&self, address: &Address) -> Option<&GraphNode> {
        self.nodes.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.nodes.contains_key(address)
    }
}
