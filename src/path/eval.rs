// path/eval.rs — evaluates a parsed path expression against a
// DiscoveredSnapshot (spec §4.1).

use super::parser::{parse, Key, Path, PathRoot, PathSegment};
use crate::errors::PathError;
use crate::model::{Address, DiscoveredSnapshot, FieldValue};

/// Result of evaluating one path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Address leaves, in document order. May contain duplicates; the
    /// caller deduplicates (spec §4.1).
    pub addresses: Vec<Address>,
    /// The structured value at the terminal node, preserved only when the
    /// terminal is an object (spec §4.1 rule 4).
    pub structured: Option<FieldValue>,
}

/// Parse and evaluate `expr` rooted at `self_address` (the contract the
/// enclosing function is defined on).
pub fn evaluate(
    expr: &str,
    self_address: &Address,
    snapshot: &DiscoveredSnapshot,
) -> Result<PathResult, PathError> {
    let path = parse(expr)?;
    evaluate_parsed(&path, self_address, snapshot)
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::Address(a) => a.to_string(),
        Key::Identifier(s) => s.clone(),
        Key::Digits(n) => n.to_string(),
    }
}

fn lookup_in_object(
    node: &FieldValue,
    key_str: &str,
    contract: &str,
) -> Result<FieldValue, PathError> {
    if let Some(v) = node.get(key_str) {
        return Ok(v.clone());
    }
    // Role-table fallback: match against role-name keys case-insensitively.
    if let FieldValue::Object { values } = node {
        for (k, v) in values {
            if k.eq_ignore_ascii_case(key_str) {
                return Ok(v.clone());
            }
        }
    }
    Err(PathError::UnknownField {
        contract: contract.to_string(),
        field: key_str.to_string(),
    })
}

fn resolve_root(
    root: &PathRoot,
    self_address: &Address,
    snapshot: &DiscoveredSnapshot,
) -> Result<Address, PathError> {
    match root {
        PathRoot::SelfRef => Ok(self_address.clone()),
        PathRoot::Address(addr) => Ok(addr.clone()),
        PathRoot::FieldRef(name) => {
            let entry = snapshot
                .get(self_address)
                .ok_or_else(|| PathError::UnknownContract(self_address.to_string()))?;
            let field = entry.field(name).ok_or_else(|| PathError::UnknownField {
                contract: self_address.to_string(),
                field: name.clone(),
            })?;
            match field {
                FieldValue::Address { address, .. } => Ok(address.clone()),
                other => Err(PathError::TypeMismatch(format!(
                    "@{} on {} resolved to a non-address value: {:?}",
                    name, self_address, other
                ))),
            }
        }
    }
}

fn evaluate_parsed(
    path: &Path,
    self_address: &Address,
    snapshot: &DiscoveredSnapshot,
) -> Result<PathResult, PathError> {
    let root_address = resolve_root(&path.root, self_address, snapshot)?;
    let entry = snapshot
        .get(&root_address)
        .ok_or_else(|| PathError::UnknownContract(root_address.to_string()))?;

    if path.segments.is_empty() {
        return Ok(PathResult { addresses: vec![root_address], structured: None });
    }

    let mut segments = path.segments.iter();

    // The first segment is always a Field per the grammar (contract-ref
    // is directly followed by '.' segment).
    let first = segments.next().expect("non-empty segments checked above");
    let mut current: FieldValue = match first {
        PathSegment::Field(name) => entry.field(name).cloned().ok_or_else(|| {
            PathError::UnknownField {
                contract: root_address.to_string(),
                field: name.clone(),
            }
        })?,
        PathSegment::Index(key) => {
            return Err(PathError::MalformedPath(
                String::new(),
                format!("path cannot open with an index key: {:?}", key_to_string(key)),
            ))
        }
    };

    for segment in segments {
        current = match segment {
            PathSegment::Field(name) => {
                lookup_in_object(&current, name, &root_address.to_string())?
            }
            PathSegment::Index(key) => match &current {
                FieldValue::Array { values } => match key {
                    Key::Digits(n) => {
                        if *n < 0 || *n as usize >= values.len() {
                            return Err(PathError::IndexOutOfRange {
                                path: root_address.to_string(),
                                index: *n,
                                len: values.len(),
                            });
                        }
                        values[*n as usize].clone()
                    }
                    _ => {
                        return Err(PathError::IndexOutOfRange {
                            path: root_address.to_string(),
                            index: -1,
                            len: values.len(),
                        })
                    }
                },
                FieldValue::Object { .. } => {
                    lookup_in_object(&current, &key_to_string(key), &root_address.to_string())?
                }
                _ => {
                    return Err(PathError::UnknownField {
                        contract: root_address.to_string(),
                        field: key_to_string(key),
                    })
                }
            },
        };
    }

    Ok(terminal_result(current))
}

fn terminal_result(node: FieldValue) -> PathResult {
    match node {
        FieldValue::Address { address, .. } => {
            PathResult { addresses: vec![address], structured: None }
        }
        FieldValue::Array { .. } => {
            let mut addrs = Vec::new();
            node.collect_addresses(&mut addrs);
            PathResult { addresses: addrs, structured: None }
        }
        FieldValue::Object { .. } => {
            let mut addrs = Vec::new();
            node.collect_addresses(&mut addrs);
            PathResult { addresses: addrs, structured: Some(node) }
        }
        scalar => PathResult { addresses: Vec::new(), structured: Some(scalar) },
    }
}
