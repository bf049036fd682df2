use marquee_core::{EventId, PurchaseIntent};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::config::PurchaseConfig;
use crate::domain::{ChannelState, Notifier, PurchaseError, PurchaseOutcome};
use crate::infrastructure::PurchaseChannel;

/// Message shown to the user when a purchase could not be sent
pub const PURCHASE_FAILED_NOTICE: &str = "Error buying event. Please try again.";

/// Submits purchase intents to the matching engine
///
/// Every attempt opens its own [`PurchaseChannel`]; nothing is pooled.
#[derive(Clone)]
pub struct PurchaseService {
    ws_url: String,
    config: PurchaseConfig,
    notifier: Arc<dyn Notifier>,
}

impl PurchaseService {
    pub fn new(ws_url: impl Into<String>, config: PurchaseConfig, notifier: Arc<dyn Notifier>) -> Self {
        PurchaseService {
            ws_url: ws_url.into(),
            config,
            notifier,
        }
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Fire-and-forget purchase of one ticket
    ///
    /// Returns immediately. The handle resolves to the channel's final state
    /// and can be dropped; failures are logged and surfaced through the
    /// notifier, never retried.
    pub fn buy_ticket(&self, event_id: impl Into<EventId>) -> JoinHandle<ChannelState> {
        self.spawn_send(PurchaseIntent::single(event_id))
    }

    /// Fire-and-forget purchase of `qty` tickets
    pub fn buy_tickets(
        &self,
        event_id: impl Into<EventId>,
        qty: u32,
    ) -> Result<JoinHandle<ChannelState>, PurchaseError> {
        let intent = PurchaseIntent::new(event_id, qty)?;
        Ok(self.spawn_send(intent))
    }

    fn spawn_send(&self, intent: PurchaseIntent) -> JoinHandle<ChannelState> {
        let service = self.clone();
        tokio::spawn(async move { service.send(&intent).await })
    }

    /// Send one intent on a fresh channel without waiting for a reply
    pub async fn send(&self, intent: &PurchaseIntent) -> ChannelState {
        let mut channel = PurchaseChannel::new(&self.ws_url);
        match channel.send(intent).await {
            Ok(()) => {
                tracing::info!(
                    "Purchase intent {} sent for event {} (qty {})",
                    intent.request_id,
                    intent.event_id,
                    intent.qty
                );
            }
            Err(e) => {
                tracing::error!("Error buying ticket for event {}: {}", intent.event_id, e);
                self.notifier.notify(PURCHASE_FAILED_NOTICE);
            }
        }
        channel.state()
    }

    /// Acknowledged purchase: wait for the engine's verdict
    ///
    /// Timeouts and transport failures are retried on a fresh channel up to
    /// `max_retries` times with the same request id. A verdict (confirmed,
    /// rejected, sold out) is returned as-is and never retried.
    pub async fn purchase(
        &self,
        event_id: impl Into<EventId>,
        qty: u32,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let intent = PurchaseIntent::new(event_id, qty)?;
        self.purchase_intent(&intent).await
    }

    pub async fn purchase_intent(&self, intent: &PurchaseIntent) -> Result<PurchaseOutcome, PurchaseError> {
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let mut channel = PurchaseChannel::new(&self.ws_url);

            match channel.request(intent, self.config.ack_timeout).await {
                Ok(Some(outcome)) => {
                    tracing::info!(
                        "Purchase {} for event {} settled: {:?}",
                        intent.request_id,
                        intent.event_id,
                        outcome
                    );
                    return Ok(outcome);
                }
                Ok(None) if attempt < max_attempts => {
                    tracing::warn!(
                        "No reply to purchase {} (attempt {}/{}), retrying",
                        intent.request_id,
                        attempt,
                        max_attempts
                    );
                }
                Ok(None) => {
                    tracing::warn!(
                        "Purchase {} timed out after {} attempt(s)",
                        intent.request_id,
                        attempt
                    );
                    return Ok(PurchaseOutcome::TimedOut {
                        request_id: intent.request_id,
                        attempts: attempt,
                    });
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        "Purchase {} failed (attempt {}/{}): {}, retrying",
                        intent.request_id,
                        attempt,
                        max_attempts,
                        e
                    );
                }
                Err(e) => {
                    tracing::error!("Error buying ticket for event {}: {}", intent.event_id, e);
                    self.notifier.notify(PURCHASE_FAILED_NOTICE);
                    return Err(PurchaseError::Channel {
                        attempts: attempt,
                        source: e,
                    });
                }
            }

            tokio::time::sleep(self.config.retry_delay).await;
        }
    }
}
