//! Text rendering for the terminal screens

use marquee_client::{FetchError, Notifier, PurchaseOutcome};
use marquee_core::InventorySnapshot;
use std::fmt::Write;

pub const SCREEN_TITLE: &str = "Browse Events";
pub const EMPTY_STATE: &str = "No events found";

/// One event card: name, location, availability, price and image
pub fn render_event_card(snapshot: &InventorySnapshot) -> String {
    format!(
        "{}\n  {}\n  Tickets: {} / {}\n  ${}\n  {}\n",
        snapshot.name(),
        snapshot.event.location,
        snapshot.available,
        snapshot.capacity(),
        snapshot.price,
        snapshot.event.card_image_url,
    )
}

/// The browse screen. A failed fetch shows the same empty state as an empty list.
pub fn render_events(result: &Result<Vec<InventorySnapshot>, FetchError>) -> String {
    let mut screen = format!("{SCREEN_TITLE}\n\n");
    match result {
        Ok(snapshots) if !snapshots.is_empty() => {
            for snapshot in snapshots {
                let _ = writeln!(screen, "{}", render_event_card(snapshot));
            }
        }
        _ => {
            let _ = writeln!(screen, "{EMPTY_STATE}");
        }
    }
    screen
}

pub fn render_outcome(outcome: &PurchaseOutcome) -> String {
    match outcome {
        PurchaseOutcome::Confirmed { request_id, message } => {
            format!("Purchase confirmed ({request_id}): {message}")
        }
        PurchaseOutcome::SoldOut { request_id, message } => {
            format!("Sold out ({request_id}): {message}")
        }
        PurchaseOutcome::Rejected { request_id, message } => {
            format!("Purchase rejected ({request_id}): {message}")
        }
        PurchaseOutcome::TimedOut {
            request_id,
            attempts,
        } => format!("No reply for {request_id} after {attempts} attempt(s)"),
    }
}

/// Alerts go to stderr so stdout stays the rendered screen
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
