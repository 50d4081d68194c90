//! Background place-details lookups.
//!
//! A lookup never fails from the caller's point of view: errors are logged
//! and become "no details".

use std::sync::Arc;

use chrono::Utc;
use lunchpick_core::{EnrichmentRecord, Place, Ticket};
use lunchpick_places::{to_enrichment_record, PlacesClient};
use tokio::sync::mpsc;

/// A finished lookup, tagged with the suggestion it was started for.
#[derive(Debug)]
pub(crate) struct Enriched {
    pub(crate) ticket: Ticket,
    pub(crate) identifier: String,
    pub(crate) record: Option<EnrichmentRecord>,
}

pub(crate) async fn lookup_record(client: &PlacesClient, place: &Place) -> Option<EnrichmentRecord> {
    match client.lookup(place).await {
        Ok(Some(details)) => Some(to_enrichment_record(&details, Utc::now())),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(place = %place.name, error = %e, "place details lookup failed");
            None
        }
    }
}

/// Run a lookup on its own task and deliver the result on `tx`.
pub(crate) fn spawn_lookup(
    client: Arc<PlacesClient>,
    place: Place,
    ticket: Ticket,
    tx: mpsc::Sender<Enriched>,
) {
    tokio::spawn(async move {
        let record = lookup_record(&client, &place).await;
        let done = Enriched {
            ticket,
            identifier: place.lookup_id().to_string(),
            record,
        };
        if tx.send(done).await.is_err() {
            tracing::debug!(place = %place.name, "picker closed before lookup finished");
        }
    });
}
