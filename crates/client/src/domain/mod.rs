pub mod channel_state;
pub mod errors;
pub mod messages;
pub mod traits;

pub use channel_state::ChannelState;
pub use errors::{ChannelError, FetchError, PurchaseError};
pub use messages::{ClientMessage, PurchaseOutcome, PurchaseReply, ReplyStatus};
pub use traits::{InventorySource, Notifier};
