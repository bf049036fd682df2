//! Infrastructure Layer - Adapters for the systems we consume from
//!
//! - RestClient: HTTP client for the events/tickets origin
//! - PurchaseChannel: one-shot WebSocket channel to the matching engine
//! - LogNotifier: notification sink that writes to the log

mod notifier;
mod purchase_channel;
mod rest_client;

pub use notifier::LogNotifier;
pub use purchase_channel::PurchaseChannel;
pub use rest_client::{RestClient, RestError};
