//! Ethereum JSON-RPC reader for registry and arbitrator contracts.

use super::http::post_json;
use super::{ChainReader, DataSourceError};
use crate::domain::{Address, DisputeId, RegistryParameters, StakeMultipliers, Wei};
use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

sol! {
    interface IArbitrator {
        function arbitrationCost(bytes _extraData) external view returns (uint256);
        function appealCost(uint256 _disputeID, bytes _extraData) external view returns (uint256);
    }

    interface ICurateRegistry {
        function challengePeriodDuration() external view returns (uint256);
        function sharedStakeMultiplier() external view returns (uint256);
        function winnerStakeMultiplier() external view returns (uint256);
        function loserStakeMultiplier() external view returns (uint256);
        function MULTIPLIER_DIVISOR() external view returns (uint256);
        function arbitrator() external view returns (address);
        function arbitratorExtraData() external view returns (bytes);
        function submissionBaseDeposit() external view returns (uint256);
        function removalBaseDeposit() external view returns (uint256);
        function submissionChallengeBaseDeposit() external view returns (uint256);
        function removalChallengeBaseDeposit() external view returns (uint256);
    }
}

/// Extract the return data from a JSON-RPC response envelope.
pub fn parse_rpc_result(response: &serde_json::Value) -> Result<Vec<u8>, DataSourceError> {
    if let Some(error) = response.get("error") {
        let msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown RPC error");
        return Err(DataSourceError::UpstreamError(msg.to_string()));
    }

    let result = response
        .get("result")
        .and_then(|r| r.as_str())
        .ok_or_else(|| {
            DataSourceError::ParseError("JSON-RPC response missing 'result' field".to_string())
        })?;
    let body = result.strip_prefix("0x").unwrap_or(result);
    hex::decode(body).map_err(|e| DataSourceError::ParseError(format!("return data: {}", e)))
}

/// Decode the return data of `C`, rejecting truncated or out-of-bounds payloads.
pub fn decode_return<C: SolCall>(data: &[u8]) -> Result<C::Return, DataSourceError> {
    C::abi_decode_returns(data, true)
        .map_err(|e| DataSourceError::ParseError(format!("{}: {}", C::SIGNATURE, e)))
}

/// Reads contract state through `eth_call` against the latest block.
#[derive(Debug, Clone)]
pub struct RpcChainReader {
    client: Client,
    rpc_url: String,
    retry_max_elapsed: Duration,
}

impl RpcChainReader {
    pub fn new(rpc_url: String, retry_max_elapsed: Duration) -> Self {
        Self {
            client: Client::new(),
            rpc_url,
            retry_max_elapsed,
        }
    }

    /// Execute `eth_call` and return the raw return data.
    async fn eth_call(&self, to: &Address, calldata: Vec<u8>) -> Result<Vec<u8>, DataSourceError> {
        let data = format!("0x{}", hex::encode(calldata));
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [{ "to": to.to_string(), "data": data }, "latest"],
            "id": 1
        });

        let response = post_json(&self.client, &self.rpc_url, &payload, self.retry_max_elapsed).await?;
        parse_rpc_result(&response)
    }

    async fn call<C: SolCall>(&self, to: &Address, call: C) -> Result<C::Return, DataSourceError> {
        let data = self.eth_call(to, call.abi_encode()).await?;
        decode_return::<C>(&data)
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn fetch_arbitration_cost(
        &self,
        arbitrator: &Address,
        dispute_id: Option<DisputeId>,
        extra_data: &[u8],
    ) -> Result<Wei, DataSourceError> {
        debug!(
            "Fetching arbitration cost from arbitrator={}, dispute={:?}",
            arbitrator, dispute_id
        );

        let extra_data = extra_data.to_vec().into();
        let cost = match dispute_id {
            Some(id) => {
                let call = IArbitrator::appealCostCall {
                    _disputeID: U256::from(id.0),
                    _extraData: extra_data,
                };
                self.call(arbitrator, call).await?._0
            }
            None => {
                let call = IArbitrator::arbitrationCostCall {
                    _extraData: extra_data,
                };
                self.call(arbitrator, call).await?._0
            }
        };
        Ok(Wei::from_u256(cost))
    }

    async fn fetch_registry_parameters(
        &self,
        registry: &Address,
    ) -> Result<RegistryParameters, DataSourceError> {
        debug!("Fetching registry parameters for registry={}", registry);

        let (
            shared,
            winner,
            loser,
            divisor,
            challenge_period_duration,
            arbitrator,
            arbitrator_extra_data,
            submission_base_deposit,
            removal_base_deposit,
            submission_challenge_base_deposit,
            removal_challenge_base_deposit,
        ) = futures::try_join!(
            self.call(registry, ICurateRegistry::sharedStakeMultiplierCall {}),
            self.call(registry, ICurateRegistry::winnerStakeMultiplierCall {}),
            self.call(registry, ICurateRegistry::loserStakeMultiplierCall {}),
            self.call(registry, ICurateRegistry::MULTIPLIER_DIVISORCall {}),
            self.fetch_challenge_period_duration(registry),
            self.call(registry, ICurateRegistry::arbitratorCall {}),
            self.call(registry, ICurateRegistry::arbitratorExtraDataCall {}),
            self.call(registry, ICurateRegistry::submissionBaseDepositCall {}),
            self.call(registry, ICurateRegistry::removalBaseDepositCall {}),
            self.call(registry, ICurateRegistry::submissionChallengeBaseDepositCall {}),
            self.call(registry, ICurateRegistry::removalChallengeBaseDepositCall {}),
        )?;

        Ok(RegistryParameters {
            multipliers: StakeMultipliers {
                shared: shared._0,
                winner: winner._0,
                loser: loser._0,
                divisor: divisor._0,
            },
            challenge_period_duration,
            arbitrator: Address::new(arbitrator._0),
            arbitrator_extra_data: arbitrator_extra_data._0.to_vec(),
            submission_base_deposit: Wei::from_u256(submission_base_deposit._0),
            removal_base_deposit: Wei::from_u256(removal_base_deposit._0),
            submission_challenge_base_deposit: Wei::from_u256(submission_challenge_base_deposit._0),
            removal_challenge_base_deposit: Wei::from_u256(removal_challenge_base_deposit._0),
        })
    }

    async fn fetch_challenge_period_duration(
        &self,
        registry: &Address,
    ) -> Result<u64, DataSourceError> {
        debug!("Fetching challenge period for registry={}", registry);
        let secs = self
            .call(registry, ICurateRegistry::challengePeriodDurationCall {})
            .await?
            ._0;
        u64::try_from(secs).map_err(|_| {
            DataSourceError::ParseError(format!("challenge period {} out of range", secs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;
    use serde_json::json;

    fn word(value: u64) -> Vec<u8> {
        U256::from(value).abi_encode()
    }

    #[test]
    fn test_parse_rpc_result_hex() {
        let response = json!({ "jsonrpc": "2.0", "id": 1, "result": "0x01ff" });
        assert_eq!(parse_rpc_result(&response).unwrap(), vec![0x01, 0xff]);
    }

    #[test]
    fn test_parse_rpc_result_error_envelope() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 3, "message": "execution reverted" }
        });
        match parse_rpc_result(&response) {
            Err(DataSourceError::UpstreamError(msg)) => assert_eq!(msg, "execution reverted"),
            other => panic!("unexpected: {:?}", other),
        }

        let bare = json!({ "error": {} });
        assert!(matches!(
            parse_rpc_result(&bare),
            Err(DataSourceError::UpstreamError(msg)) if msg == "unknown RPC error"
        ));
    }

    #[test]
    fn test_parse_rpc_result_malformed() {
        assert!(matches!(
            parse_rpc_result(&json!({ "jsonrpc": "2.0", "id": 1 })),
            Err(DataSourceError::ParseError(_))
        ));
        assert!(matches!(
            parse_rpc_result(&json!({ "result": "0xzz" })),
            Err(DataSourceError::ParseError(_))
        ));
        assert!(matches!(
            parse_rpc_result(&json!({ "result": 7 })),
            Err(DataSourceError::ParseError(_))
        ));
    }

    #[test]
    fn test_appeal_cost_calldata_layout() {
        let call = IArbitrator::appealCostCall {
            _disputeID: U256::from(7),
            _extraData: vec![0xab].into(),
        };
        let data = call.abi_encode();

        assert_eq!(&data[..4], IArbitrator::appealCostCall::SELECTOR.as_slice());
        // dispute id, bytes offset, bytes length, one padded data word
        assert_eq!(data.len(), 4 + 4 * 32);
        assert_eq!(&data[4..36], word(7).as_slice());
        assert_eq!(&data[36..68], word(64).as_slice());
        assert_eq!(&data[68..100], word(1).as_slice());
        assert_eq!(data[100], 0xab);
    }

    #[test]
    fn test_decode_uint_above_128_bits() {
        let big = U256::from(u128::MAX) + U256::from(1);
        let ret = decode_return::<ICurateRegistry::submissionBaseDepositCall>(&big.abi_encode())
            .unwrap();
        assert_eq!(Wei::from_u256(ret._0), Wei::from_u256(big));
    }

    #[test]
    fn test_decode_address_return() {
        let addr = alloy_primitives::Address::with_last_byte(0x09);
        let ret = decode_return::<ICurateRegistry::arbitratorCall>(&addr.abi_encode()).unwrap();
        assert_eq!(Address::new(ret._0), Address::with_last_byte(0x09));
    }

    #[test]
    fn test_decode_bytes_return() {
        let mut data = word(32);
        data.extend(word(2));
        let mut payload = vec![0xbe, 0xef];
        payload.resize(32, 0);
        data.extend(payload);

        let ret = decode_return::<ICurateRegistry::arbitratorExtraDataCall>(&data).unwrap();
        assert_eq!(ret._0.to_vec(), vec![0xbe, 0xef]);
    }

    #[test]
    fn test_decode_rejects_out_of_range_offset() {
        let data = U256::from(u64::MAX).abi_encode();
        let result = decode_return::<ICurateRegistry::arbitratorExtraDataCall>(&data);
        assert!(matches!(result, Err(DataSourceError::ParseError(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_length() {
        let mut data = word(32);
        data.extend(word(u64::MAX));
        let result = decode_return::<ICurateRegistry::arbitratorExtraDataCall>(&data);
        assert!(matches!(result, Err(DataSourceError::ParseError(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_word() {
        let result = decode_return::<ICurateRegistry::challengePeriodDurationCall>(&[0u8; 31]);
        assert!(matches!(result, Err(DataSourceError::ParseError(_))));
        let empty = decode_return::<IArbitrator::arbitrationCostCall>(&[]);
        assert!(matches!(empty, Err(DataSourceError::ParseError(_))));
    }
}
