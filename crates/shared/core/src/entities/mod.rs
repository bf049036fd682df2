mod event;
mod purchase;
mod snapshot;
mod ticket;

pub use event::{Event, EventCategory, PLACEHOLDER_IMAGE_URL};
pub use purchase::{DEFAULT_QUANTITY, IntentError, PurchaseIntent};
pub use snapshot::{InventorySnapshot, aggregate};
pub use ticket::{Ticket, TicketType};
