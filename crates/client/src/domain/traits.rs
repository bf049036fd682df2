use async_trait::async_trait;
use marquee_core::{Event, EventId, Ticket};

use super::errors::FetchError;

/// Source of event and ticket listings
///
/// Implements Dependency Inversion - the fetch cycle depends on this
/// abstraction, the REST client is one implementation.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// All events, in the order the origin returned them
    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError>;

    /// Tickets listed for one event, in origin order
    async fn fetch_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, FetchError>;
}

/// User-visible notification sink
///
/// Purchase channel failures are surfaced here, the presentation layer
/// decides how (dialog, stderr, toast).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
