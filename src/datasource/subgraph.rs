//! GraphQL client for the indexed item source.

use super::http::post_json;
use super::{DataSourceError, SubgraphSource};
use crate::domain::{ItemId, RawItem};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const ITEM_QUERY: &str = r#"
query Item($id: String!) {
  item(id: $id) {
    itemID
    status
    disputed
    requests(orderBy: submissionTime, orderDirection: desc) {
      requestType
      submissionTime
      disputed
      resolved
      resolutionTime
      disputeID
      requester
      challenger
      arbitrator
      arbitratorExtraData
      rounds(orderBy: creationTime, orderDirection: desc) {
        ruling
        appealPeriodStart
        appealPeriodEnd
        hasPaidRequester
        hasPaidChallenger
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct GraphqlSubgraph {
    client: Client,
    url: String,
    retry_max_elapsed: Duration,
}

impl GraphqlSubgraph {
    pub fn new(url: String, retry_max_elapsed: Duration) -> Self {
        Self {
            client: Client::new(),
            url,
            retry_max_elapsed,
        }
    }
}

/// Extract `data.item` from a GraphQL response body.
///
/// A `null` item means the index has no such item. Any entry in `errors`
/// fails the whole response.
fn parse_item_response(body: serde_json::Value) -> Result<Option<RawItem>, DataSourceError> {
    if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
        if let Some(first) = errors.first() {
            let msg = first
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown GraphQL error");
            return Err(DataSourceError::UpstreamError(msg.to_string()));
        }
    }

    let item = body
        .get("data")
        .and_then(|d| d.get("item"))
        .ok_or_else(|| DataSourceError::ParseError("GraphQL response missing 'data.item'".to_string()))?;

    if item.is_null() {
        return Ok(None);
    }

    serde_json::from_value(item.clone())
        .map(Some)
        .map_err(|e| DataSourceError::ParseError(format!("Failed to parse item: {}", e)))
}

#[async_trait]
impl SubgraphSource for GraphqlSubgraph {
    async fn fetch_item(&self, id: &ItemId) -> Result<Option<RawItem>, DataSourceError> {
        debug!("Fetching item {} from subgraph", id);

        let payload = serde_json::json!({
            "query": ITEM_QUERY,
            "variables": { "id": id.to_string() }
        });
        let body = post_json(&self.client, &self.url, &payload, self.retry_max_elapsed).await?;
        parse_item_response(body)
    }
}
