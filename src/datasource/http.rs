//! JSON-over-HTTP POST with exponential backoff.

use super::DataSourceError;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Sort a response status into success, retryable or fatal.
pub fn classify_status(status: StatusCode) -> Result<(), backoff::Error<DataSourceError>> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(backoff::Error::transient(DataSourceError::RateLimited));
    }
    if status.is_server_error() {
        return Err(backoff::Error::transient(DataSourceError::HttpError {
            status: status.as_u16(),
            message: "Server error".to_string(),
        }));
    }
    if !status.is_success() {
        return Err(backoff::Error::permanent(DataSourceError::HttpError {
            status: status.as_u16(),
            message: "Client error".to_string(),
        }));
    }
    Ok(())
}

/// POST `payload` to `url` and decode the JSON body.
///
/// Network failures, 429 and 5xx are retried until `max_elapsed` has passed.
/// Other client errors and undecodable bodies fail immediately.
pub async fn post_json(
    client: &Client,
    url: &str,
    payload: &serde_json::Value,
    max_elapsed: Duration,
) -> Result<serde_json::Value, DataSourceError> {
    let backoff = ExponentialBackoff {
        max_elapsed_time: Some(max_elapsed),
        ..Default::default()
    };

    retry(backoff, || async {
        let response = client.post(url).json(payload).send().await.map_err(|e| {
            backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
        })?;

        classify_status(response.status())?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| backoff::Error::permanent(DataSourceError::ParseError(e.to_string())))
    })
    .await
}
