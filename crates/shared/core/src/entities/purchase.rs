use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::values::{EventId, RequestId};

/// Default quantity when the caller does not specify one
pub const DEFAULT_QUANTITY: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// One-shot request for the matching engine to allocate tickets
///
/// Purchaser identity is not modeled; it comes from the session on the
/// engine side. The intent has no client-side lifecycle once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    pub event_id: EventId,
    pub qty: u32,
    pub request_id: RequestId,
}

impl PurchaseIntent {
    /// Intent for a single ticket
    pub fn single(event_id: impl Into<EventId>) -> Self {
        PurchaseIntent {
            event_id: event_id.into(),
            qty: DEFAULT_QUANTITY,
            request_id: RequestId::new(),
        }
    }

    pub fn new(event_id: impl Into<EventId>, qty: u32) -> Result<Self, IntentError> {
        if qty == 0 {
            return Err(IntentError::ZeroQuantity);
        }
        Ok(PurchaseIntent {
            event_id: event_id.into(),
            qty,
            request_id: RequestId::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_defaults_to_one() {
        let intent = PurchaseIntent::single(42);
        assert_eq!(intent.event_id, EventId(42));
        assert_eq!(intent.qty, 1);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(PurchaseIntent::new(42, 0), Err(IntentError::ZeroQuantity));
        assert_eq!(PurchaseIntent::new(42, 3).unwrap().qty, 3);
    }

    #[test]
    fn test_each_intent_gets_its_own_request_id() {
        assert_ne!(
            PurchaseIntent::single(1).request_id,
            PurchaseIntent::single(1).request_id
        );
    }
}
