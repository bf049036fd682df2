use async_trait::async_trait;
use marquee_core::{Event, EventCategory, EventId, Ticket};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;

use crate::domain::{FetchError, InventorySource};

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RestError {
    /// Convert to the domain FetchError, scoped to the resource that failed
    pub fn into_fetch_error(self, resource: &str) -> FetchError {
        match self {
            RestError::Http(e) => FetchError::transport(resource, e.to_string()),
            RestError::Status { status, body } => {
                let reason = status.canonical_reason().unwrap_or("unknown status");
                let message = if body.is_empty() {
                    reason.to_string()
                } else {
                    format!("{}: {}", reason, body)
                };
                FetchError::status(resource, status.as_u16(), message)
            }
            RestError::Parse(e) => FetchError::decode(resource, e.to_string()),
        }
    }
}

/// Event object as served by `GET /events`
///
/// The origin may also send `available`; it is ignored because aggregation
/// recomputes it from the ticket listing.
#[derive(Debug, Deserialize)]
struct EventPayload {
    id: EventId,
    name: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    card_image_url: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    category: Option<EventCategory>,
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        let mut event = Event::new(
            payload.id,
            payload.name,
            payload.location.unwrap_or_default(),
            payload.capacity.unwrap_or_default(),
        )
        .with_card_image(payload.card_image_url);
        event.address = payload.address;
        event.category = payload.category;
        event
    }
}

/// REST client for the events/tickets origin
///
/// Unauthenticated and cache-free: every call goes to the origin. Clones
/// share the underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        RestClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get all events, in origin order
    pub async fn get_events(&self) -> Result<Vec<Event>, RestError> {
        let payload: Vec<EventPayload> = self.get("/events").await?;
        Ok(payload.into_iter().map(Event::from).collect())
    }

    /// Get the tickets listed for one event
    pub async fn get_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, RestError> {
        let path = format!("/tickets/{}", event_id);
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RestError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, RestError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(RestError::Status { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

fn log_failure(resource: &str, err: RestError) -> FetchError {
    let err = err.into_fetch_error(resource);
    tracing::error!("Failed to fetch {}: {}", resource, err);
    err
}

/// Implement InventorySource for RestClient (Dependency Inversion)
///
/// Errors are logged here and returned unchanged: no retry, no fallback.
#[async_trait]
impl InventorySource for RestClient {
    async fn fetch_events(&self) -> Result<Vec<Event>, FetchError> {
        let events = self
            .get_events()
            .await
            .map_err(|e| log_failure("events", e))?;
        tracing::debug!("Fetched {} event(s)", events.len());
        Ok(events)
    }

    async fn fetch_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, FetchError> {
        let tickets = self
            .get_tickets(event_id)
            .await
            .map_err(|e| log_failure(&format!("tickets/{}", event_id), e))?;
        tracing::debug!("Fetched {} ticket(s) for event {}", tickets.len(), event_id);
        Ok(tickets)
    }
}
