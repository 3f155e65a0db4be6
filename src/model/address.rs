// model/address.rs — chain-qualified addresses (spec §3).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A chain-qualified identifier of the form `<chain>:<hex>`, e.g.
/// `eth:0xABCD`. Equality and hashing are on the normalized lowercase hex
/// portion; the chain tag is compared case-sensitively (it is an opaque
/// short tag, not user input).
#[derive(Debug, Clone, Eq)]
pub struct Address {
    chain: String,
    hex: String,
}

impl Address {
    /// Build an address from parts, normalizing the hex portion to
    /// lowercase.
    pub fn new(chain: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            hex: hex.into().to_lowercase(),
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Normalize a bare hex address (as used by the Tagging Store
    /// boundary) to the qualified form under the given chain.
    pub fn from_bare_hex(chain: impl Into<String>, hex: &str) -> Self {
        Self::new(chain, hex)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.chain == other.chain && self.hex == other.hex
    }
}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.chain.hash(state);
        self.hex.hash(state);
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.chain.as_str(), self.hex.as_str()).cmp(&(other.chain.as_str(), other.hex.as_str()))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.hex)
    }
}

/// Error parsing a qualified address string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("malformed address: {0:?}")]
pub struct AddressParseError(pub String);

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((chain, hex)) if !chain.is_empty() && !hex.is_empty() => {
                Ok(Address::new(chain, hex))
            }
            _ => Err(AddressParseError(s.to_string())),
        }
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A closed tagged set of on-chain address kinds (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AddressType {
    #[serde(rename = "EOA")]
    Eoa,
    #[serde(rename = "EOAPermissioned")]
    EoaPermissioned,
    Unverified,
    Token,
    Multisig,
    Diamond,
    Timelock,
    Contract,
    Unknown,
}

impl AddressType {
    /// Terminal types halt traversal (spec §3, §4.5).
    pub fn is_terminal(self) -> bool {
        matches!(self, AddressType::Eoa | AddressType::Multisig | AddressType::Unknown)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressType::Eoa => "EOA",
            AddressType::EoaPermissioned => "EOAPermissioned",
            AddressType::Unverified => "Unverified",
            AddressType::Token => "Token",
            AddressType::Multisig => "Multisig",
            AddressType::Diamond => "Diamond",
            AddressType::Timelock => "Timelock",
            AddressType::Contract => "Contract",
            AddressType::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}
