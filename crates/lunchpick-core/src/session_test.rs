use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::enrichment::Review;
use crate::store::{MemoryStore, LAST_ACTIVE_DATE_KEY, SKIPPED_TODAY_KEY};

fn day(d: u32) -> DateKey {
    DateKey::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
}

fn session_with(csv: &str) -> Session<MemoryStore> {
    let mut session = Session::open(MemoryStore::new(), day(2)).unwrap();
    session.load_places(Ok::<_, String>(csv.to_string())).unwrap();
    session
}

fn record(rating: f64) -> EnrichmentRecord {
    EnrichmentRecord {
        rating: Some(rating),
        rating_count: Some(10),
        photo_reference: None,
        review: Some(Review {
            text: "Solid".to_string(),
            author: "Kim".to_string(),
            rating: Some(4.0),
        }),
        is_closed: false,
        cached_at: Utc::now(),
    }
}

#[test]
fn source_failure_is_distinct_from_empty_list() {
    let mut session = Session::open(MemoryStore::new(), day(2)).unwrap();

    let unavailable = session.load_places(Err::<String, _>("connection refused"));
    assert_eq!(
        unavailable,
        Err(LoadError::SourceUnavailable("connection refused".to_string()))
    );

    let empty = session.load_places(Ok::<_, String>("Name,URL\n".to_string()));
    assert_eq!(empty, Err(LoadError::EmptyPlaceSet));
}

#[test]
fn source_failure_keeps_previous_places() {
    let mut session = session_with("A\nB");
    let result = session.load_places(Err::<String, _>("timeout"));
    assert!(result.is_err());
    assert_eq!(session.places().len(), 2);
}

#[test]
fn suggest_on_empty_session_fails() {
    let mut session = Session::open(MemoryStore::new(), day(2)).unwrap();
    let result = session.suggest(day(2), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(CoreError::EmptyPlaceSet)));
}

#[test]
fn suggest_marks_and_sets_current() {
    let mut session = session_with("Thai Garden\nSushi Go");
    let suggestion = session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(session.current(), Some(&suggestion.place));
    assert!(session.memory().is_suggested(&suggestion.place.name));
    assert_eq!(suggestion.accent, accent_for(&suggestion.place.name));
    assert_eq!(suggestion.tier, Tier::Fresh);
    assert!(suggestion.cached.is_none());
}

#[test]
fn consecutive_suggestions_cycle_before_repeating() {
    let mut session = session_with("A\nB\nC\nD");
    let mut rng = StdRng::seed_from_u64(3);

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(session.suggest(day(2), &mut rng).unwrap().place.name);
    }
    seen.sort();
    assert_eq!(seen, vec!["A", "B", "C", "D"]);

    // Fifth pick resets the rotation, and never repeats the one on screen.
    let last = session.current().cloned().unwrap();
    let fifth = session.suggest(day(2), &mut rng).unwrap();
    assert_eq!(fifth.tier, Tier::RotationReset);
    assert_ne!(fifth.place, last);
    assert_eq!(session.memory().suggested_count(), 1);
}

#[test]
fn not_today_persists_skip_and_moves_on() {
    let mut session = session_with("A\nB\nC");
    let mut rng = StdRng::seed_from_u64(9);
    let first = session.suggest(day(2), &mut rng).unwrap();

    let next = session.not_today(day(2), &mut rng).unwrap();

    assert_ne!(next.place, first.place);
    assert!(session.memory().is_skipped(&first.place.name));
    let raw = session.store.get(SKIPPED_TODAY_KEY).unwrap();
    assert!(raw.contains(&first.place.name));
}

#[test]
fn skips_survive_a_new_session_on_the_same_day() {
    let mut session = session_with("A\nB\nC");
    let mut rng = StdRng::seed_from_u64(5);
    let first = session.suggest(day(2), &mut rng).unwrap();
    session.not_today(day(2), &mut rng).unwrap();

    let store = session.store.clone();
    let reopened = Session::open(store, day(2)).unwrap();
    assert!(reopened.memory().is_skipped(&first.place.name));
    assert_eq!(reopened.memory().suggested_count(), 0);
}

#[test]
fn opening_on_a_new_day_clears_everything() {
    let mut store = MemoryStore::new();
    store.set(LAST_ACTIVE_DATE_KEY, "2024-01-01").unwrap();
    store.set(SKIPPED_TODAY_KEY, r#"["A","B"]"#).unwrap();

    let session = Session::open(store, day(2)).unwrap();

    assert_eq!(session.memory().skipped_count(), 0);
    assert_eq!(
        session.store.get(LAST_ACTIVE_DATE_KEY).as_deref(),
        Some("2024-01-02")
    );
}

#[test]
fn suggest_rolls_over_when_the_day_changes_mid_session() {
    let mut session = session_with("A\nB");
    let mut rng = StdRng::seed_from_u64(2);
    session.suggest(day(2), &mut rng).unwrap();
    session.not_today(day(2), &mut rng).unwrap();
    assert_eq!(session.memory().skipped_count(), 1);

    session.suggest(day(3), &mut rng).unwrap();

    assert_eq!(session.memory().skipped_count(), 0);
    assert_eq!(session.memory().day(), day(3));
}

#[test]
fn single_place_keeps_coming_back() {
    let mut session = session_with("Only Option");
    let mut rng = StdRng::seed_from_u64(4);
    let first = session.suggest(day(2), &mut rng).unwrap();
    let again = session.not_today(day(2), &mut rng).unwrap();
    assert_eq!(first.place, again.place);
    assert_eq!(again.tier, Tier::OnlyCurrent);
}

#[test]
fn stale_enrichment_is_cached_but_not_displayed() {
    let mut session = session_with("A,https://a.example\nB,https://b.example\nC");
    let mut rng = StdRng::seed_from_u64(11);

    let first = session.suggest(day(2), &mut rng).unwrap();
    let second = session.suggest(day(2), &mut rng).unwrap();
    assert!(!session.is_current(first.ticket));
    assert!(session.is_current(second.ticket));

    let first_id = first.place.lookup_id().to_string();
    let shown = session.apply_enrichment(first.ticket, &first_id, Some(record(4.1)));
    assert!(shown.is_none(), "stale result must not be displayed");
    assert!(session.cached_details(&first.place).is_some());

    let second_id = second.place.lookup_id().to_string();
    let shown = session.apply_enrichment(second.ticket, &second_id, Some(record(4.8)));
    assert_eq!(shown.and_then(|r| r.rating), Some(4.8));
}

#[test]
fn hide_invalidates_pending_enrichment() {
    let mut session = session_with("A\nB");
    let suggestion = session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();
    session.hide();

    assert!(session.current().is_none());
    assert!(!session.is_current(suggestion.ticket));
    let id = suggestion.place.lookup_id().to_string();
    assert!(session.apply_enrichment(suggestion.ticket, &id, None).is_none());
}

#[test]
fn cached_details_are_attached_to_later_suggestions() {
    let mut session = session_with("Only,https://only.example");
    let mut rng = StdRng::seed_from_u64(1);
    let first = session.suggest(day(2), &mut rng).unwrap();
    session.apply_enrichment(first.ticket, "https://only.example", Some(record(4.3)));

    let again = session.suggest(day(2), &mut rng).unwrap();
    assert_eq!(again.cached.and_then(|r| r.rating), Some(4.3));
}

#[test]
fn no_match_leaves_cache_untouched() {
    let mut session = session_with("A");
    let suggestion = session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();
    let shown = session.apply_enrichment(suggestion.ticket, "A", None);
    assert!(shown.is_none());
    assert!(session.cached_details(&suggestion.place).is_none());
}

#[test]
fn never_again_hides_and_returns_place() {
    let mut session = session_with("A\nB");
    let suggestion = session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();

    let removed = session.never_again();

    assert_eq!(removed, Some(suggestion.place));
    assert!(session.current().is_none());
    assert!(session.never_again().is_none());
}

#[test]
fn reload_drops_current_that_left_the_list() {
    let mut session = session_with("A");
    session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();
    session.load_places(Ok::<_, String>("B\nC".to_string())).unwrap();
    assert!(session.current().is_none());
}

#[test]
fn reload_keeps_current_that_is_still_listed() {
    let mut session = session_with("A");
    session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();
    session.load_places(Ok::<_, String>("A\nB".to_string())).unwrap();
    assert_eq!(session.current().map(|p| p.name.as_str()), Some("A"));
}

#[test]
fn emptied_list_stops_before_touching_memory() {
    let mut session = session_with("A");
    session.suggest(day(2), &mut StdRng::seed_from_u64(1)).unwrap();
    let emptied = session.load_places(Ok::<_, String>("Name\n".to_string()));
    assert_eq!(emptied, Err(LoadError::EmptyPlaceSet));

    let mut rng = StdRng::seed_from_u64(2);
    assert_eq!(session.suggest(day(3), &mut rng).unwrap_err(), CoreError::EmptyPlaceSet);
    assert_eq!(session.not_today(day(3), &mut rng).unwrap_err(), CoreError::EmptyPlaceSet);

    // No rollover to day 3 and no skip recorded.
    assert_eq!(session.memory().day(), day(2));
    assert_eq!(session.memory().skipped_count(), 0);
    assert!(session.current().is_none());
}
