use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Event, Ticket};
use crate::values::{EventId, Price};

/// Point-in-time inventory view of one event
///
/// `available` is the number of tickets returned for the event when it was
/// fetched, `price` the price of the first-returned ticket (zero when none).
/// The price is a display sample, not authoritative pricing. Nothing holds
/// across snapshots: tickets are fetched in a separate round-trip from the
/// event listing, so both figures can already be stale when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(flatten)]
    pub event: Event,
    pub available: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,
}

impl InventorySnapshot {
    pub fn id(&self) -> EventId {
        self.event.id
    }

    pub fn name(&self) -> &str {
        &self.event.name
    }

    pub fn capacity(&self) -> u32 {
        self.event.capacity
    }

    pub fn is_sold_out(&self) -> bool {
        self.available == 0
    }

    /// Whether a price was sampled from at least one ticket
    pub fn has_price(&self) -> bool {
        self.available > 0
    }
}

/// Fold an event's ticket collection into its inventory snapshot
///
/// Total: never fails, an empty collection yields `available == 0` and
/// `price == 0`. Tickets are counted as given; callers are expected to pass
/// the collection fetched for this event.
pub fn aggregate(event: Event, tickets: &[Ticket]) -> InventorySnapshot {
    let available = u32::try_from(tickets.len()).unwrap_or(u32::MAX);
    let price = tickets.first().map_or(Decimal::ZERO, |ticket| ticket.price);

    InventorySnapshot {
        event,
        available,
        price,
    }
}
