//! Plain-text rendering for the terminal.

use lunchpick_core::{accent_for, EnrichmentRecord, KvStore, LoadError, Place, Session, Suggestion};
use lunchpick_places::PlacesClient;

const PHOTO_MAX_WIDTH: u32 = 400;

pub(crate) fn suggestion_card(suggestion: &Suggestion) -> String {
    let lines = [
        String::new(),
        format!("  How about {}?", suggestion.place.name),
        format!("    accent  {}", suggestion.accent),
        format!("    map     {}", suggestion.place.link()),
    ];
    finish(&lines)
}

/// Details block for an enriched suggestion. The photo link is only shown
/// when a client is available to sign it.
pub(crate) fn details(record: &EnrichmentRecord, client: Option<&PlacesClient>) -> String {
    let mut lines = Vec::new();
    if record.is_closed {
        lines.push("    note    listed as closed".to_string());
    }
    if let Some(summary) = record.rating_summary() {
        lines.push(format!("    rating  {summary}"));
    }
    if let Some(review) = &record.review {
        lines.push(format!("    review  \"{}\"", review.text));
        lines.push(match review.rating {
            Some(rating) => format!("            {} ({rating:.0}★)", review.author),
            None => format!("            {}", review.author),
        });
    }
    if let (Some(reference), Some(client)) = (&record.photo_reference, client) {
        match client.photo_url(reference, PHOTO_MAX_WIDTH) {
            Ok(url) => lines.push(format!("    photo   {url}")),
            Err(e) => tracing::debug!(error = %e, "could not build photo link"),
        }
    }
    finish(&lines)
}

/// Every place in list order with its accent and any cached rating.
pub(crate) fn place_list<S: KvStore>(session: &Session<S>, edit_url: Option<&str>) -> String {
    let memory = session.memory();
    let mut lines: Vec<String> = session
        .places()
        .iter()
        .map(|place| {
            let rating = session
                .cached_details(place)
                .and_then(EnrichmentRecord::rating_summary)
                .unwrap_or_default();
            let marker = if memory.is_skipped(&place.name) {
                " (not today)"
            } else {
                ""
            };
            format!(
                "  {:<32} {:<24} {rating}{marker}",
                place.name,
                accent_for(&place.name).to_string()
            )
        })
        .collect();

    lines.push(format!(
        "{} places, {} suggested today, {} skipped today",
        session.places().len(),
        memory.suggested_count(),
        memory.skipped_count()
    ));
    if let Some(url) = edit_url {
        lines.push(format!("Edit the list: {url}"));
    }
    finish(&lines)
}

pub(crate) fn never_again_notice(place: &Place, edit_url: Option<&str>) -> String {
    match edit_url {
        Some(url) => format!("Remove {} from the list here: {url}\n", place.name),
        None => format!("Remove {} from the place sheet to stop seeing it.\n", place.name),
    }
}

pub(crate) fn load_failure(err: &LoadError) -> String {
    match err {
        LoadError::SourceUnavailable(reason) => {
            format!("Could not load the place list ({reason}). Press r to retry.\n")
        }
        LoadError::EmptyPlaceSet => {
            "The place list is empty. Add some places, then press r to reload.\n".to_string()
        }
    }
}

/// Newline-terminated block, empty when there are no lines.
fn finish(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub(crate) fn print_accent(name: &str) {
    let accent = accent_for(name);
    println!("{accent}");
    println!("{}", accent.css());
}
