// delay.rs — Delay Resolver (spec §4.3): reads a numeric field from a
// named contract and returns a non-negative integer number of seconds.

use crate::errors::DelayError;
use crate::model::{DelayRef, DiscoveredSnapshot, FieldValue};

/// Resolve one delay reference to a number of seconds. On failure the
/// caller (the Traversal Engine) treats the delay as zero and records a
/// warning (spec §4.3).
pub fn resolve_delay(delay_ref: &DelayRef, snapshot: &DiscoveredSnapshot) -> Result<u64, DelayError> {
    let entry = snapshot.get(&delay_ref.contract_address).ok_or_else(|| {
        DelayError::ContractMissing(delay_ref.contract_address.to_string())
    })?;

    let field = entry.field(&delay_ref.field_name).ok_or_else(|| DelayError::FieldMissing {
        contract: delay_ref.contract_address.to_string(),
        field: delay_ref.field_name.clone(),
    })?;

    let decimal = match field {
        FieldValue::Number { value } => value,
        _ => {
            return Err(DelayError::NotNumeric {
                contract: delay_ref.contract_address.to_string(),
                field: delay_ref.field_name.clone(),
            })
        }
    };

    let parsed: i128 = decimal.parse().map_err(|_| DelayError::NotNumeric {
        contract: delay_ref.contract_address.to_string(),
        field: delay_ref.field_name.clone(),
    })?;

    if parsed < 0 {
        return Err(DelayError::Negative {
            contract: delay_ref.contract_address.to_string(),
            field: delay_ref.field_name.clone(),
        });
    }

    Ok(parsed as u64)
}
