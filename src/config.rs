use crate::orchestration::HUMANIZE_UNITS_RANGE;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub rpc_url: String,
    pub subgraph_url: String,
    /// How long cached registry parameters are served without a refresh.
    pub parameters_ttl_ms: i64,
    pub countdown_units: usize,
    pub retry_max_elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

fn required(env_map: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    env_map
        .get(key)
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

fn parsed<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    env_map
        .get(key)
        .map(|s| s.as_str())
        .unwrap_or(default)
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), expected.to_string()))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parsed::<u16>(&env_map, "PORT", "8080", "must be a valid u16")?;
        let database_path = required(&env_map, "DATABASE_PATH")?;
        let rpc_url = required(&env_map, "RPC_URL")?;
        let subgraph_url = required(&env_map, "SUBGRAPH_URL")?;

        let parameters_ttl_ms = parsed::<i64>(
            &env_map,
            "PARAMETERS_TTL_MS",
            "300000",
            "must be a non-negative i64",
        )?;
        if parameters_ttl_ms < 0 {
            return Err(ConfigError::InvalidValue(
                "PARAMETERS_TTL_MS".to_string(),
                "must be a non-negative i64".to_string(),
            ));
        }

        let countdown_units = parsed::<usize>(&env_map, "COUNTDOWN_UNITS", "2", "must be 1 to 4")?;
        if !HUMANIZE_UNITS_RANGE.contains(&countdown_units) {
            return Err(ConfigError::InvalidValue(
                "COUNTDOWN_UNITS".to_string(),
                format!("must be 1 to 4, got {}", countdown_units),
            ));
        }

        let retry_max_elapsed_ms = parsed::<u64>(
            &env_map,
            "RETRY_MAX_ELAPSED_MS",
            "30000",
            "must be a valid u64",
        )?;

        Ok(Config {
            port,
            database_path,
            rpc_url,
            subgraph_url,
            parameters_ttl_ms,
            countdown_units,
            retry_max_elapsed: Duration::from_millis(retry_max_elapsed_ms),
        })
    }
}
