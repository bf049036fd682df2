use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::{ClientConfig, InventoryConfig, PurchaseConfig};

/// Root configuration for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfigFile {
    pub rest: RestConfigJson,
    pub matching_engine: MatchingEngineConfigJson,
}

/// REST origin serving events and tickets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfigJson {
    /// Origin for `/events` and `/tickets/{id}`
    pub base_url: String,
    /// Maximum ticket fetches in flight during one cycle (1 = sequential)
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

/// WebSocket matching engine receiving purchase intents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingEngineConfigJson {
    pub ws_url: String,
    /// How long an acknowledged purchase waits for the engine's reply
    #[serde(default = "default_ack_timeout")]
    pub ack_timeout_ms: u64,
    /// Extra attempts after a timeout or transport failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl ClientConfigFile {
    /// Convert to application-layer ClientConfig
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.rest.base_url.clone(),
            ws_url: self.matching_engine.ws_url.clone(),
            request_timeout: Duration::from_millis(self.rest.request_timeout_ms),
            inventory: InventoryConfig {
                fetch_concurrency: self.rest.fetch_concurrency,
            },
            purchase: PurchaseConfig {
                ack_timeout: Duration::from_millis(self.matching_engine.ack_timeout_ms),
                max_retries: self.matching_engine.max_retries,
                retry_delay: Duration::from_millis(self.matching_engine.retry_delay_ms),
            },
        }
    }
}

// Default value functions for serde
fn default_fetch_concurrency() -> usize {
    1
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_ack_timeout() -> u64 {
    5_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    250
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let json = r#"{
            "rest": { "base_url": "http://localhost:8081" },
            "matching_engine": { "ws_url": "ws://localhost:8080" }
        }"#;

        let config: ClientConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.rest.fetch_concurrency, 1);
        assert_eq!(config.rest.request_timeout_ms, 10_000);
        assert_eq!(config.matching_engine.ack_timeout_ms, 5_000);
        assert_eq!(config.matching_engine.max_retries, 2);
    }

    #[test]
    fn test_to_client_config() {
        let json = r#"{
            "rest": { "base_url": "http://localhost:8081", "fetch_concurrency": 4 },
            "matching_engine": { "ws_url": "ws://localhost:8080", "ack_timeout_ms": 1500, "retry_delay_ms": 10 }
        }"#;

        let config: ClientConfigFile = serde_json::from_str(json).unwrap();
        let client = config.to_client_config();
        assert_eq!(client.base_url, "http://localhost:8081");
        assert_eq!(client.inventory.fetch_concurrency, 4);
        assert_eq!(client.purchase.ack_timeout, Duration::from_millis(1500));
        assert_eq!(client.purchase.retry_delay, Duration::from_millis(10));
    }
}
