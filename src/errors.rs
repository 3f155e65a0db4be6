// errors.rs — error kinds for the engine (spec §7).
//
// Structural errors abort a run; Path and Delay errors are local and
// downgrade to a warning attached to the enclosing function, per §7's
// propagation policy.

use thiserror::Error;

/// Errors raised while evaluating a path expression (spec §4.1, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unknown contract: {0}")]
    UnknownContract(String),
    #[error("unknown field {field:?} on {contract}")]
    UnknownField { contract: String, field: String },
    #[error("index {index} out of range (len {len}) at {path}")]
    IndexOutOfRange { path: String, index: i64, len: usize },
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("malformed path {0:?}: {1}")]
    MalformedPath(String, String),
}

/// Errors raised while resolving a delay reference (spec §4.3, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DelayError {
    #[error("delay contract missing: {0}")]
    ContractMissing(String),
    #[error("delay field missing: {contract}.{field}")]
    FieldMissing { contract: String, field: String },
    #[error("delay field {contract}.{field} is not numeric")]
    NotNumeric { contract: String, field: String },
    #[error("delay field {contract}.{field} is negative")]
    Negative { contract: String, field: String },
}

/// Structural errors abort the whole run (spec §7).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("missing overrides file: {0}")]
    MissingOverridesFile(String),
    #[error("missing discovered file: {0}")]
    MissingDiscoveredFile(String),
    #[error("malformed JSON in {path}: {source}")]
    MalformedJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
