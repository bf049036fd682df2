use futures_util::{StreamExt, TryStreamExt, stream};
use marquee_core::{Event, InventorySnapshot, Ticket, aggregate};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::config::InventoryConfig;
use crate::domain::{FetchError, InventorySource};

/// Builds inventory snapshots from an [`InventorySource`]
///
/// One load is one fetch cycle: the event listing, then each event's tickets
/// through a bounded fan-out, joined back in listing order. Snapshots are
/// only returned once the whole pass has finished; the first failed fetch
/// fails the cycle. Nothing is cached or shared between cycles.
#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn InventorySource>,
    config: InventoryConfig,
}

impl InventoryService {
    pub fn new(source: Arc<dyn InventorySource>, config: InventoryConfig) -> Self {
        InventoryService { source, config }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Run one full fetch cycle
    pub async fn load(&self) -> Result<Vec<InventorySnapshot>, FetchError> {
        let events = self.source.fetch_events().await?;
        let limit = self.config.fetch_concurrency.max(1);
        tracing::info!(
            "Loading tickets for {} event(s), {} in flight at most",
            events.len(),
            limit
        );

        let source = &self.source;
        let snapshots: Vec<InventorySnapshot> = stream::iter(events)
            .map(|event| async move {
                let tickets = source.fetch_tickets(event.id).await?;
                Ok::<_, FetchError>(fold(event, tickets))
            })
            .buffered(limit)
            .try_collect()
            .await?;

        tracing::info!("Loaded {} inventory snapshot(s)", snapshots.len());
        Ok(snapshots)
    }

    /// Run one fetch cycle unless `shutdown` fires first
    ///
    /// Returns `Ok(None)` when cancelled; in-flight requests are dropped and
    /// no snapshots are delivered. A dropped sender counts as cancellation,
    /// which ties the cycle to its caller's lifetime.
    pub async fn load_until(
        &self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<Option<Vec<InventorySnapshot>>, FetchError> {
        if *shutdown.borrow() {
            return Ok(None);
        }

        tokio::select! {
            result = self.load() => result.map(Some),
            _ = cancelled(&mut shutdown) => {
                tracing::info!("Inventory load cancelled");
                Ok(None)
            }
        }
    }

    /// Spawn a fetch cycle bound to the returned handle
    pub fn spawn(&self) -> FetchCycle {
        let (cancel, shutdown) = watch::channel(false);
        let service = self.clone();
        let handle = tokio::spawn(async move { service.load_until(shutdown).await });

        FetchCycle {
            cancel,
            handle: Some(handle),
        }
    }
}

/// Resolves once the flag is set or the sender is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

fn fold(event: Event, tickets: Vec<Ticket>) -> InventorySnapshot {
    let foreign = tickets.iter().filter(|t| !t.belongs_to(event.id)).count();
    if foreign > 0 {
        tracing::warn!(
            "{} ticket(s) listed for event {} reference another event",
            foreign,
            event.id
        );
    }
    aggregate(event, &tickets)
}

/// Handle to a spawned fetch cycle
///
/// Dropping the handle cancels the cycle.
pub struct FetchCycle {
    cancel: watch::Sender<bool>,
    handle: Option<JoinHandle<Result<Option<Vec<InventorySnapshot>>, FetchError>>>,
}

impl FetchCycle {
    /// Abandon the cycle; its result will be `Ok(None)`
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Wait for the cycle's result
    ///
    /// A panic inside the cycle is re-raised here rather than reported as a
    /// cancellation.
    pub async fn join(mut self) -> Result<Option<Vec<InventorySnapshot>>, FetchError> {
        let Some(handle) = self.handle.take() else {
            return Ok(None);
        };
        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => {
                tracing::error!("Fetch cycle task panicked");
                std::panic::resume_unwind(e.into_panic())
            }
            Err(e) => {
                tracing::debug!("Fetch cycle task aborted: {}", e);
                Ok(None)
            }
        }
    }
}

impl Drop for FetchCycle {
    fn drop(&mut self) {
        // Also reached when a pending join() is dropped
        self.cancel();
    }
}
