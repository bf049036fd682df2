//! Inventory integration tests
//!
//! Runs the REST client and fetch cycle against an in-process origin that
//! serves `/events` and `/tickets/{id}` and records every request it sees.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use marquee_client::{
    ClientConfig, FetchError, InventoryConfig, InventorySource, LogNotifier, RestClient,
    TicketingClient,
};
use marquee_core::{EventCategory, EventId, PLACEHOLDER_IMAGE_URL, Price};
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// ============================================================================
// Test Fixtures
// ============================================================================

struct Origin {
    events_status: StatusCode,
    events_body: String,
    tickets: HashMap<u64, Value>,
    requests: Mutex<Vec<String>>,
}

type OriginState = Arc<Origin>;

impl Origin {
    fn new(events: Value) -> Self {
        Self::with_events_response(StatusCode::OK, &events.to_string())
    }

    fn with_events_response(status: StatusCode, body: &str) -> Self {
        Origin {
            events_status: status,
            events_body: body.to_string(),
            tickets: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn tickets(mut self, event_id: u64, tickets: Value) -> Self {
        self.tickets.insert(event_id, tickets);
        self
    }
}

async fn events_handler(State(origin): State<OriginState>) -> Response {
    origin.requests.lock().push("/events".to_string());
    (origin.events_status, origin.events_body.clone()).into_response()
}

async fn tickets_handler(Path(id): Path<u64>, State(origin): State<OriginState>) -> Response {
    origin.requests.lock().push(format!("/tickets/{}", id));
    match origin.tickets.get(&id) {
        Some(tickets) => Json(tickets.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start a test origin and return its base URL
async fn start_origin(origin: Origin) -> (String, OriginState) {
    let state = Arc::new(origin);

    let app = Router::new()
        .route("/events", get(events_handler))
        .route("/tickets/{id}", get(tickets_handler))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn concert_origin() -> Origin {
    Origin::new(json!([
        { "id": 1, "name": "Concert", "location": "Arena", "capacity": 100 }
    ]))
    .tickets(
        1,
        json!([
            { "id": 9, "eventId": 1, "holderName": "A", "price": 50 },
            { "id": 10, "eventId": 1, "holderName": "B", "price": 50 }
        ]),
    )
}

fn client_for(base_url: &str, concurrency: usize) -> TicketingClient {
    let config = ClientConfig::new(base_url, "ws://127.0.0.1:1")
        .with_inventory(InventoryConfig::default().with_fetch_concurrency(concurrency));
    TicketingClient::new(config, Arc::new(LogNotifier)).unwrap()
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[tokio::test]
async fn test_concert_snapshot() {
    let (base_url, _) = start_origin(concert_origin()).await;

    let snapshots = client_for(&base_url, 1).fetch_events().await.unwrap();

    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.id(), EventId(1));
    assert_eq!(snapshot.name(), "Concert");
    assert_eq!(snapshot.event.location, "Arena");
    assert_eq!(snapshot.capacity(), 100);
    assert_eq!(snapshot.available, 2);
    assert_eq!(snapshot.price, dec!(50));
    assert_eq!(snapshot.event.card_image_url, PLACEHOLDER_IMAGE_URL);
}

#[tokio::test]
async fn test_event_without_tickets() {
    let origin = Origin::new(json!([
        { "id": 3, "name": "Quiet Night", "location": "Club", "capacity": 40 }
    ]))
    .tickets(3, json!([]));
    let (base_url, _) = start_origin(origin).await;

    let snapshots = client_for(&base_url, 1).fetch_events().await.unwrap();

    assert_eq!(snapshots[0].available, 0);
    assert_eq!(snapshots[0].price, Price::ZERO);
    assert!(snapshots[0].is_sold_out());
}

#[tokio::test]
async fn test_backend_field_names_accepted() {
    let origin = Origin::new(json!([
        {
            "id": 5,
            "name": "Rooftop",
            "location": "Downtown",
            "address": "5 Main St",
            "category": "Club",
            "capacity": 80,
            "available": 80,
            "card_image_url": "https://cdn.example.com/rooftop.png"
        }
    ]))
    .tickets(
        5,
        json!([
            { "id": 1, "event_id": 5, "price": 12.5, "ticket_type": "GA", "seat": null },
            { "id": 2, "event_id": 5, "price": 30, "ticket_type": "VIP", "seat": "B4" }
        ]),
    );
    let (base_url, _) = start_origin(origin).await;

    let snapshots = client_for(&base_url, 1).fetch_events().await.unwrap();

    let snapshot = &snapshots[0];
    assert_eq!(snapshot.available, 2);
    assert_eq!(snapshot.price, dec!(12.5));
    assert_eq!(snapshot.event.category, Some(EventCategory::Club));
    assert_eq!(snapshot.event.card_image_url, "https://cdn.example.com/rooftop.png");
}

// ============================================================================
// Ordering Tests
// ============================================================================

#[tokio::test]
async fn test_ticket_fetches_follow_event_order() {
    let origin = Origin::new(json!([
        { "id": 1, "name": "First", "location": "A", "capacity": 10 },
        { "id": 2, "name": "Second", "location": "B", "capacity": 20 }
    ]))
    .tickets(1, json!([{ "id": 1, "eventId": 1, "holderName": "x", "price": 5 }]))
    .tickets(2, json!([]));
    let (base_url, state) = start_origin(origin).await;

    let snapshots = client_for(&base_url, 1).fetch_events().await.unwrap();

    assert_eq!(
        *state.requests.lock(),
        vec!["/events", "/tickets/1", "/tickets/2"]
    );
    let names: Vec<&str> = snapshots.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_concurrent_fetch_preserves_snapshot_order() {
    let mut events = Vec::new();
    let mut origin_tickets = Vec::new();
    for id in 1..=8u64 {
        events.push(json!({ "id": id, "name": format!("Event {}", id), "location": "L", "capacity": 10 }));
        let tickets: Vec<Value> = (0..id)
            .map(|n| json!({ "id": n, "eventId": id, "holderName": "h", "price": id }))
            .collect();
        origin_tickets.push((id, Value::Array(tickets)));
    }
    let mut origin = Origin::new(Value::Array(events));
    for (id, tickets) in origin_tickets {
        origin = origin.tickets(id, tickets);
    }
    let (base_url, state) = start_origin(origin).await;

    let snapshots = client_for(&base_url, 4).fetch_events().await.unwrap();

    let available: Vec<u32> = snapshots.iter().map(|s| s.available).collect();
    assert_eq!(available, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    let prices: Vec<Price> = snapshots.iter().map(|s| s.price).collect();
    assert_eq!(prices, (1..=8).map(Price::from).collect::<Vec<_>>());
    assert_eq!(state.requests.lock().len(), 9);
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_non_2xx_is_transport_error() {
    let origin = Origin::with_events_response(StatusCode::SERVICE_UNAVAILABLE, "maintenance");
    let (base_url, _) = start_origin(origin).await;

    let err = client_for(&base_url, 1).fetch_events().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.http_status(), Some(503));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let origin = Origin::with_events_response(StatusCode::OK, r#"{"events": "#);
    let (base_url, _) = start_origin(origin).await;

    let err = client_for(&base_url, 1).fetch_events().await.unwrap_err();

    assert!(err.is_decode());
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let origin = Origin::with_events_response(StatusCode::OK, r#"{"id": 1, "name": "Solo"}"#);
    let (base_url, _) = start_origin(origin).await;

    let err = client_for(&base_url, 1).fetch_events().await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { ref resource, .. } if resource == "events"));
}

#[tokio::test]
async fn test_missing_tickets_fails_cycle() {
    let origin = Origin::new(json!([
        { "id": 1, "name": "First", "location": "A", "capacity": 10 },
        { "id": 2, "name": "Second", "location": "B", "capacity": 20 }
    ]))
    .tickets(2, json!([]));
    let (base_url, state) = start_origin(origin).await;

    let err = client_for(&base_url, 1).fetch_events().await.unwrap_err();

    assert_eq!(err.http_status(), Some(404));
    assert!(matches!(err, FetchError::Transport { ref resource, .. } if resource == "tickets/1"));
    assert!(!state.requests.lock().contains(&"/tickets/2".to_string()));
}

#[tokio::test]
async fn test_unreachable_origin_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RestClient::with_timeout(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.fetch_events().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.http_status(), None);
}

// ============================================================================
// Rest Client Tests
// ============================================================================

#[tokio::test]
async fn test_rest_client_direct_fetch_tickets() {
    let (base_url, _) = start_origin(concert_origin()).await;
    let client = RestClient::new(format!("{}/", base_url));

    let tickets = client.fetch_tickets(EventId(1)).await.unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].holder_name, "A");
    assert_eq!(tickets[1].id.0, 10);
}

#[tokio::test]
async fn test_every_call_refetches() {
    let (base_url, state) = start_origin(concert_origin()).await;
    let client = client_for(&base_url, 1);

    client.fetch_events().await.unwrap();
    client.fetch_events().await.unwrap();

    assert_eq!(state.requests.lock().len(), 4);
}

#[tokio::test]
async fn test_spawned_fetch_delivers_snapshots() {
    let (base_url, _) = start_origin(concert_origin()).await;

    let snapshots = client_for(&base_url, 1)
        .spawn_fetch()
        .join()
        .await
        .unwrap()
        .expect("cycle was not cancelled");

    assert_eq!(snapshots[0].available, 2);
}
