use marquee_core::{DEFAULT_QUANTITY, EventId, PurchaseIntent, RequestId};
use serde::{Deserialize, Serialize};

/// Messages sent to the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ClientMessage {
    BuyTicket {
        #[serde(rename = "eventId")]
        event_id: EventId,
        #[serde(default = "default_qty")]
        qty: u32,
        #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
        request_id: Option<RequestId>,
    },
}

fn default_qty() -> u32 {
    DEFAULT_QUANTITY
}

impl From<&PurchaseIntent> for ClientMessage {
    fn from(intent: &PurchaseIntent) -> Self {
        ClientMessage::BuyTicket {
            event_id: intent.event_id,
            qty: intent.qty,
            request_id: Some(intent.request_id),
        }
    }
}

/// Engine verdict carried by a reply frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplyStatus {
    Confirmed,
    Rejected,
    SoldOut,
}

/// Reply frame from the matching engine, correlated by request id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReply {
    pub request_id: RequestId,
    pub status: ReplyStatus,
    #[serde(default)]
    pub message: String,
}

impl PurchaseReply {
    /// Parse a text frame, `None` for anything that is not a reply
    /// (welcome banners, frames from other protocols)
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    pub fn into_outcome(self) -> PurchaseOutcome {
        let PurchaseReply {
            request_id,
            status,
            message,
        } = self;
        match status {
            ReplyStatus::Confirmed => PurchaseOutcome::Confirmed {
                request_id,
                message,
            },
            ReplyStatus::Rejected => PurchaseOutcome::Rejected {
                request_id,
                message,
            },
            ReplyStatus::SoldOut => PurchaseOutcome::SoldOut {
                request_id,
                message,
            },
        }
    }
}

/// Result of an acknowledged purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Engine allocated the tickets
    Confirmed {
        request_id: RequestId,
        message: String,
    },
    /// Not enough inventory for the requested quantity
    SoldOut {
        request_id: RequestId,
        message: String,
    },
    /// Engine refused the request for another reason
    Rejected {
        request_id: RequestId,
        message: String,
    },
    /// No reply within the ack timeout on any attempt
    TimedOut { request_id: RequestId, attempts: u32 },
}

impl PurchaseOutcome {
    pub fn request_id(&self) -> RequestId {
        match self {
            PurchaseOutcome::Confirmed { request_id, .. }
            | PurchaseOutcome::SoldOut { request_id, .. }
            | PurchaseOutcome::Rejected { request_id, .. }
            | PurchaseOutcome::TimedOut { request_id, .. } => *request_id,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, PurchaseOutcome::Confirmed { .. })
    }
}
