//! Marquee Core Domain
//!
//! Pure domain types for the Marquee ticketing client.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! The one piece of logic that lives here is the inventory aggregator:
//! folding a fetched ticket collection into an event to produce the
//! display-ready [`InventorySnapshot`].

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Catalog
    Event,
    EventCategory,
    // Derived inventory
    InventorySnapshot,
    // Purchase
    DEFAULT_QUANTITY,
    IntentError,
    PLACEHOLDER_IMAGE_URL,
    PurchaseIntent,
    Ticket,
    TicketType,
    aggregate,
};
pub use values::{EventId, Price, RequestId, TicketId};
