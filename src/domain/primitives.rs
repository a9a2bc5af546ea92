//! Domain primitives: TimeMs, UnixSeconds, Address, ItemId, DisputeId, Wei, Party.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wall-clock reading in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Create a TimeMs from whole seconds.
    pub fn from_secs(secs: i64) -> Self {
        TimeMs(secs.saturating_mul(1000))
    }

    /// Get the underlying milliseconds value.
    pub fn as_ms(&self) -> i64 {
        self.0
    }
}

/// On-chain timestamp in seconds. Zero means "not applicable".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnixSeconds(pub u64);

impl UnixSeconds {
    pub fn new(secs: u64) -> Self {
        UnixSeconds(secs)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for the zero sentinel used by contracts for unset timestamps.
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Saturating addition of a duration in seconds.
    pub fn plus(&self, secs: u64) -> Self {
        UnixSeconds(self.0.saturating_add(secs))
    }

    /// Convert to a millisecond reading, saturating at `i64::MAX`.
    pub fn to_time_ms(&self) -> TimeMs {
        let secs = i64::try_from(self.0).unwrap_or(i64::MAX);
        TimeMs::from_secs(secs)
    }
}

impl fmt::Display for UnixSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must be 20 bytes, got {0}")]
    WrongLength(usize),
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

/// EVM address. Renders as lowercase `0x` hex, the casing the indexed data
/// source uses inside item ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(alloy_primitives::Address);

impl Address {
    pub const ZERO: Address = Address(alloy_primitives::Address::ZERO);

    pub const fn new(inner: alloy_primitives::Address) -> Self {
        Address(inner)
    }

    /// Address whose bytes are all zero except the last one.
    pub fn with_last_byte(byte: u8) -> Self {
        Address(alloy_primitives::Address::with_last_byte(byte))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == alloy_primitives::Address::ZERO
    }

    pub fn into_inner(self) -> alloy_primitives::Address {
        self.0
    }
}

impl From<alloy_primitives::Address> for Address {
    fn from(inner: alloy_primitives::Address) -> Self {
        Address(inner)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressParseError::MissingPrefix)?;
        let bytes = hex::decode(body).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(AddressParseError::WrongLength(bytes.len()));
        }
        Ok(Address(alloy_primitives::Address::from_slice(&bytes)))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_slice()))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Registry item identifier: the item key scoped to its registry.
///
/// Renders as `key@registry`, the form used by the indexed data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId {
    pub registry: Address,
    pub key: String,
}

impl ItemId {
    pub fn new(registry: Address, key: impl Into<String>) -> Self {
        Self {
            registry,
            key: key.into().to_lowercase(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.registry)
    }
}

/// Arbitrator-assigned dispute number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisputeId(pub u64);

impl fmt::Display for DisputeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wei amount: {0}")]
pub struct WeiParseError(String);

/// Amount in the chain's smallest native unit.
///
/// Serialized as a decimal string; JSON numbers cannot carry 256-bit values
/// without loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(pub U256);

impl Wei {
    pub fn new(amount: u128) -> Self {
        Wei(U256::from(amount))
    }

    pub const fn from_u256(amount: U256) -> Self {
        Wei(amount)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Wei {
    type Err = WeiParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() {
            return Err(WeiParseError("empty".to_string()));
        }
        U256::from_str_radix(digits, 10)
            .map(Wei)
            .map_err(|e| WeiParseError(format!("{digits}: {e}")))
    }
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The two sides of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Requester,
    Challenger,
}

impl Party {
    pub fn opponent(&self) -> Party {
        match self {
            Party::Requester => Party::Challenger,
            Party::Challenger => Party::Requester,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Requester => write!(f, "requester"),
            Party::Challenger => write!(f, "challenger"),
        }
    }
}
