//! Per-registry economic parameters read from the registry contract.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::primitives::{Address, Wei};

/// Stake multipliers, expressed as fractions of `divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeMultipliers {
    pub shared: U256,
    pub winner: U256,
    pub loser: U256,
    pub divisor: U256,
}

impl StakeMultipliers {
    pub fn new(shared: u64, winner: u64, loser: u64, divisor: u64) -> Self {
        Self {
            shared: U256::from(shared),
            winner: U256::from(winner),
            loser: U256::from(loser),
            divisor: U256::from(divisor),
        }
    }
}

/// Registry parameters. Effectively static; served from cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryParameters {
    pub multipliers: StakeMultipliers,
    /// Seconds an undisputed request waits before it can be executed.
    pub challenge_period_duration: u64,
    pub arbitrator: Address,
    #[serde(with = "hex_bytes")]
    pub arbitrator_extra_data: Vec<u8>,
    pub submission_base_deposit: Wei,
    pub removal_base_deposit: Wei,
    pub submission_challenge_base_deposit: Wei,
    pub removal_challenge_base_deposit: Wei,
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_json_keeps_extra_data_as_hex() {
        let params = RegistryParameters {
            multipliers: StakeMultipliers::new(10_000, 10_000, 20_000, 10_000),
            challenge_period_duration: 600,
            arbitrator: Address::with_last_byte(0x09),
            arbitrator_extra_data: vec![0x01, 0xff],
            submission_base_deposit: Wei::new(1),
            removal_base_deposit: Wei::new(2),
            submission_challenge_base_deposit: Wei::new(3),
            removal_challenge_base_deposit: Wei::new(4),
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["arbitratorExtraData"], "0x01ff");
        assert_eq!(json["submissionBaseDeposit"], "1");

        let back: RegistryParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
