use std::time::Duration;

/// Configuration for the inventory fetch cycle
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Maximum ticket fetches in flight; 1 fetches strictly one event after another
    pub fetch_concurrency: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            fetch_concurrency: 1,
        }
    }
}

impl InventoryConfig {
    pub fn with_fetch_concurrency(mut self, n: usize) -> Self {
        self.fetch_concurrency = n.max(1);
        self
    }
}

/// Configuration for acknowledged purchases
#[derive(Debug, Clone)]
pub struct PurchaseConfig {
    /// How long one attempt waits for the engine's reply
    pub ack_timeout: Duration,
    /// Extra attempts after a timeout or transport failure
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        PurchaseConfig {
            ack_timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_delay: Duration::from_millis(250),
        }
    }
}

impl PurchaseConfig {
    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Configuration for the client facade
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST origin for events and tickets
    pub base_url: String,
    /// Matching engine WebSocket endpoint
    pub ws_url: String,
    pub request_timeout: Duration,
    pub inventory: InventoryConfig,
    pub purchase: PurchaseConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, ws_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ws_url: ws_url.into(),
            request_timeout: Duration::from_secs(10),
            inventory: InventoryConfig::default(),
            purchase: PurchaseConfig::default(),
        }
    }

    pub fn with_inventory(mut self, inventory: InventoryConfig) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_purchase(mut self, purchase: PurchaseConfig) -> Self {
        self.purchase = purchase;
        self
    }
}
