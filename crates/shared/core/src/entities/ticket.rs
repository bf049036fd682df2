use serde::{Deserialize, Serialize};

use crate::values::{EventId, Price, TicketId};

/// Admission class of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    #[serde(rename = "GA")]
    GeneralAdmission,
    #[serde(rename = "VIP")]
    Vip,
}

/// A ticket listed for an event
///
/// The client never mutates tickets; it only counts and samples them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    #[serde(alias = "event_id")]
    pub event_id: EventId,
    #[serde(alias = "holder_name", default)]
    pub holder_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,
    #[serde(alias = "ticket_type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<TicketType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
}

impl Ticket {
    pub fn new(id: u64, event_id: impl Into<EventId>, holder_name: impl Into<String>, price: Price) -> Self {
        Ticket {
            id: TicketId(id),
            event_id: event_id.into(),
            holder_name: holder_name.into(),
            price,
            ticket_type: None,
            seat: None,
        }
    }

    pub fn belongs_to(&self, event_id: EventId) -> bool {
        self.event_id == event_id
    }
}
