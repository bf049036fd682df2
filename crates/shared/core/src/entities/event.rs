use serde::{Deserialize, Serialize};

use crate::values::EventId;

/// Cover image shown when the server has none for an event
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x200.png?text=Event";

/// Kind of event, as categorized by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Festival,
    Concert,
    Club,
    Birthday,
    Dinner,
}

/// Catalog entry for an event
///
/// Held as an immutable-per-fetch copy; the next fetch supersedes it wholesale.
/// Inventory figures are not part of the event itself, see
/// [`InventorySnapshot`](super::InventorySnapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub location: String,
    /// Total seats, independent of how many tickets are listed
    pub capacity: u32,
    pub card_image_url: String,
    pub address: Option<String>,
    pub category: Option<EventCategory>,
}

impl Event {
    pub fn new(id: impl Into<EventId>, name: impl Into<String>, location: impl Into<String>, capacity: u32) -> Self {
        Event {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            capacity,
            card_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            address: None,
            category: None,
        }
    }

    /// Set the cover image, falling back to the placeholder when blank
    pub fn with_card_image(mut self, url: Option<String>) -> Self {
        self.card_image_url = match url {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_IMAGE_URL.to_string(),
        };
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn has_placeholder_image(&self) -> bool {
        self.card_image_url == PLACEHOLDER_IMAGE_URL
    }
}
