//! Item graphs as returned by the indexed data source.
//!
//! Requests and rounds arrive newest first and numeric fields arrive as
//! strings (GraphQL `BigInt`). Nothing here is interpreted; see
//! [`super::ordering`] for the conversion into engine types.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(rename = "itemID")]
    pub item_id: String,
    pub status: String,
    #[serde(default)]
    pub disputed: bool,
    #[serde(default)]
    pub requests: Vec<RawRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    pub request_type: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub submission_time: u64,
    #[serde(default)]
    pub disputed: bool,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub resolution_time: Option<u64>,
    #[serde(rename = "disputeID", default, deserialize_with = "lenient_opt_u64")]
    pub dispute_id: Option<u64>,
    pub requester: String,
    #[serde(default)]
    pub challenger: Option<String>,
    #[serde(default)]
    pub arbitrator: Option<String>,
    #[serde(default)]
    pub arbitrator_extra_data: Option<String>,
    #[serde(default)]
    pub rounds: Vec<RawRound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRound {
    #[serde(default)]
    pub ruling: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub appeal_period_start: Option<u64>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub appeal_period_end: Option<u64>,
    #[serde(default)]
    pub has_paid_requester: bool,
    #[serde(default)]
    pub has_paid_challenger: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Num(u64),
    Str(String),
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_opt_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<NumOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrString::Num(n)) => Ok(Some(n)),
        Some(NumOrString::Str(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
