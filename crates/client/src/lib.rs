//! Marquee Client
//!
//! Client-side inventory synchronization and ticket purchase flow.
//!
//! Follows Clean Architecture with four layers:
//! - **Config**: JSON-based configuration for the REST origin and matching engine
//! - **Domain**: Ports, errors, channel lifecycle and wire messages
//! - **Application**: Fetch cycle and purchase use cases
//! - **Infrastructure**: External dependencies (REST, WebSocket clients)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐              ┌──────────────────┐
//! │   REST origin    │              │ Matching engine  │
//! │ /events          │              │   (WebSocket)    │
//! │ /tickets/{id}    │              │                  │
//! └────────┬─────────┘              └────────▲─────────┘
//!          │ HTTP                            │ one message per channel
//!          ▼                                 │
//! ┌────────────────────────────────────────────────────────┐
//! │                    TicketingClient                     │
//! │  ┌──────────────┐   ┌──────────────┐  ┌─────────────┐  │
//! │  │  RestClient  │──▶│  Inventory   │  │  Purchase   │  │
//! │  │(InventorySrc)│   │   Service    │  │   Service   │  │
//! │  └──────────────┘   └──────┬───────┘  └──────┬──────┘  │
//! │                    aggregate()        PurchaseChannel  │
//! └────────────────────────────┼─────────────────┼─────────┘
//!                              ▼                 ▲
//!                     Vec<InventorySnapshot>  buy_ticket(id)
//!                              │                 │
//!                        ┌─────┴─────────────────┴─────┐
//!                        │     Presentation layer      │
//!                        └─────────────────────────────┘
//! ```
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "rest": { "base_url": "http://127.0.0.1:8081", "fetch_concurrency": 1 },
//!   "matching_engine": { "ws_url": "ws://127.0.0.1:8080", "ack_timeout_ms": 5000 }
//! }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use marquee_core::{EventId, InventorySnapshot};
use std::sync::Arc;
use tokio::task::JoinHandle;

// Re-export commonly used types for convenience

// Config layer
pub use config::{
    ClientConfigFile, ConfigError, MatchingEngineConfigJson, RestConfigJson, load_config,
    load_config_from_str, load_default_config,
};

// Domain layer
pub use domain::{
    ChannelError, ChannelState, ClientMessage, FetchError, InventorySource, Notifier,
    PurchaseError, PurchaseOutcome, PurchaseReply, ReplyStatus,
};

// Application layer
pub use application::{
    ClientConfig, FetchCycle, InventoryConfig, InventoryService, PURCHASE_FAILED_NOTICE,
    PurchaseConfig, PurchaseService,
};

// Infrastructure layer
pub use infrastructure::{LogNotifier, PurchaseChannel, RestClient, RestError};

/// Client facade - what the presentation layer talks to
pub struct TicketingClient {
    config: ClientConfig,
    inventory: InventoryService,
    purchases: PurchaseService,
}

impl TicketingClient {
    /// Build a client backed by the REST origin in `config`
    pub fn new(config: ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, RestError> {
        let rest_client = RestClient::with_timeout(config.base_url.clone(), config.request_timeout)?;
        Ok(Self::with_source(config, Arc::new(rest_client), notifier))
    }

    /// Build a client over any inventory source
    pub fn with_source(
        config: ClientConfig,
        source: Arc<dyn InventorySource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let inventory = InventoryService::new(source, config.inventory.clone());
        let purchases = PurchaseService::new(config.ws_url.clone(), config.purchase.clone(), notifier);

        TicketingClient {
            config,
            inventory,
            purchases,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full inventory snapshot list, in event listing order
    pub async fn fetch_events(&self) -> Result<Vec<InventorySnapshot>, FetchError> {
        self.inventory.load().await
    }

    /// Start a cancellable fetch cycle
    pub fn spawn_fetch(&self) -> FetchCycle {
        self.inventory.spawn()
    }

    /// Fire-and-forget purchase of one ticket
    pub fn buy_ticket(&self, event_id: impl Into<EventId>) -> JoinHandle<ChannelState> {
        self.purchases.buy_ticket(event_id)
    }

    /// Fire-and-forget purchase of `qty` tickets
    pub fn buy_ticket_with_qty(
        &self,
        event_id: impl Into<EventId>,
        qty: u32,
    ) -> Result<JoinHandle<ChannelState>, PurchaseError> {
        self.purchases.buy_tickets(event_id, qty)
    }

    /// Purchase and wait for the engine's verdict
    pub async fn purchase(
        &self,
        event_id: impl Into<EventId>,
        qty: u32,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        self.purchases.purchase(event_id, qty).await
    }
}
