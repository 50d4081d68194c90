//! What has been shown and skipped today.
//!
//! Skips are written through to the store on every change so a restart on
//! the same day keeps them. The "suggested" set lives only in memory: it
//! exists to stop rapid repeats within one session, not across restarts.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::error::StoreError;
use crate::store::{read_json, write_json, KvStore, LAST_ACTIVE_DATE_KEY, SKIPPED_TODAY_KEY};

/// A local calendar day, stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

/// `true` unless the stored key names exactly `today`.
///
/// A missing or unparseable stored key counts as a new day.
#[must_use]
pub fn is_new_day(last_stored: Option<&str>, today: DateKey) -> bool {
    last_stored
        .and_then(|raw| raw.parse::<DateKey>().ok())
        .is_none_or(|stored| stored != today)
}

#[derive(Debug, Clone)]
pub struct DayMemory {
    day: DateKey,
    suggested: HashSet<String>,
    skipped: HashSet<String>,
}

impl DayMemory {
    /// Restore today's memory from `store`, rolling over first if the stored
    /// date is not `today`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a rollover could not be persisted.
    pub fn load<S>(store: &mut S, today: DateKey) -> Result<Self, StoreError>
    where
        S: KvStore + ?Sized,
    {
        let mut memory = Self {
            day: today,
            suggested: HashSet::new(),
            skipped: HashSet::new(),
        };

        let last = store.get(LAST_ACTIVE_DATE_KEY);
        if is_new_day(last.as_deref(), today) {
            tracing::info!(
                previous = last.as_deref().unwrap_or("none"),
                today = %today,
                "new day; clearing suggestion and skip memory"
            );
            memory.rollover(store, today)?;
        } else {
            let skipped: Vec<String> = read_json(store, SKIPPED_TODAY_KEY);
            memory.skipped = skipped.into_iter().collect();
        }

        Ok(memory)
    }

    /// Clear both sets and stamp `today` as the active day.
    ///
    /// Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cleared state could not be persisted.
    pub fn rollover<S>(&mut self, store: &mut S, today: DateKey) -> Result<(), StoreError>
    where
        S: KvStore + ?Sized,
    {
        self.day = today;
        self.suggested.clear();
        self.skipped.clear();
        store.set(LAST_ACTIVE_DATE_KEY, &today.to_string())?;
        write_json(store, SKIPPED_TODAY_KEY, &Vec::<String>::new())
    }

    /// Roll over if the clock has moved past the loaded day.
    ///
    /// Returns `true` when a rollover happened.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the rollover could not be persisted.
    pub fn ensure_day<S>(&mut self, store: &mut S, today: DateKey) -> Result<bool, StoreError>
    where
        S: KvStore + ?Sized,
    {
        if self.day == today {
            return Ok(false);
        }
        tracing::info!(previous = %self.day, today = %today, "day changed mid-session");
        self.rollover(store, today)?;
        Ok(true)
    }

    #[must_use]
    pub fn day(&self) -> DateKey {
        self.day
    }

    pub fn mark_suggested(&mut self, name: &str) {
        self.suggested.insert(name.to_owned());
    }

    /// Record a "not today" dismissal and persist it before returning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the skip list could not be written. The
    /// in-memory set is updated either way.
    pub fn mark_skipped<S>(&mut self, store: &mut S, name: &str) -> Result<(), StoreError>
    where
        S: KvStore + ?Sized,
    {
        self.skipped.insert(name.to_owned());
        let mut names: Vec<&String> = self.skipped.iter().collect();
        names.sort();
        write_json(store, SKIPPED_TODAY_KEY, &names)
    }

    #[must_use]
    pub fn is_suggested(&self, name: &str) -> bool {
        self.suggested.contains(name)
    }

    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped.contains(name)
    }

    /// Start today's rotation over. Skips are untouched.
    pub fn clear_suggested(&mut self) {
        self.suggested.clear();
    }

    #[must_use]
    pub fn suggested_count(&self) -> usize {
        self.suggested.len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn day(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn date_key_format_round_trips() {
        let key = day(2024, 1, 2);
        assert_eq!(key.to_string(), "2024-01-02");
        assert_eq!("2024-01-02".parse::<DateKey>().unwrap(), key);
    }

    #[test]
    fn is_new_day_cases() {
        let today = day(2024, 1, 2);
        assert!(is_new_day(None, today));
        assert!(is_new_day(Some("2024-01-01"), today));
        assert!(is_new_day(Some("garbage"), today));
        assert!(!is_new_day(Some("2024-01-02"), today));
    }

    #[test]
    fn load_rolls_over_on_new_day() {
        let mut store = MemoryStore::new();
        store.set(LAST_ACTIVE_DATE_KEY, "2024-01-01").unwrap();
        store.set(SKIPPED_TODAY_KEY, r#"["Thai Garden"]"#).unwrap();

        let memory = DayMemory::load(&mut store, day(2024, 1, 2)).unwrap();

        assert!(!memory.is_skipped("Thai Garden"));
        assert_eq!(memory.skipped_count(), 0);
        assert_eq!(memory.suggested_count(), 0);
        assert_eq!(
            store.get(LAST_ACTIVE_DATE_KEY).as_deref(),
            Some("2024-01-02")
        );
        let persisted: Vec<String> = read_json(&store, SKIPPED_TODAY_KEY);
        assert!(persisted.is_empty());
    }

    #[test]
    fn load_keeps_skips_on_same_day() {
        let mut store = MemoryStore::new();
        store.set(LAST_ACTIVE_DATE_KEY, "2024-01-02").unwrap();
        store.set(SKIPPED_TODAY_KEY, r#"["Thai Garden","Sushi Go"]"#).unwrap();

        let memory = DayMemory::load(&mut store, day(2024, 1, 2)).unwrap();

        assert!(memory.is_skipped("Thai Garden"));
        assert!(memory.is_skipped("Sushi Go"));
        assert!(!memory.is_skipped("Burger Barn"));
    }

    #[test]
    fn load_survives_corrupt_skip_list() {
        let mut store = MemoryStore::new();
        store.set(LAST_ACTIVE_DATE_KEY, "2024-01-02").unwrap();
        store.set(SKIPPED_TODAY_KEY, "[oops").unwrap();

        let memory = DayMemory::load(&mut store, day(2024, 1, 2)).unwrap();
        assert_eq!(memory.skipped_count(), 0);
    }

    #[test]
    fn first_run_stamps_date() {
        let mut store = MemoryStore::new();
        let _ = DayMemory::load(&mut store, day(2024, 5, 6)).unwrap();
        assert_eq!(
            store.get(LAST_ACTIVE_DATE_KEY).as_deref(),
            Some("2024-05-06")
        );
    }

    #[test]
    fn skip_survives_reload_but_suggested_does_not() {
        let mut store = MemoryStore::new();
        let today = day(2024, 1, 2);

        let mut memory = DayMemory::load(&mut store, today).unwrap();
        memory.mark_suggested("Burger Barn");
        memory.mark_skipped(&mut store, "Thai Garden").unwrap();
        assert!(memory.is_suggested("Burger Barn"));

        let reloaded = DayMemory::load(&mut store, today).unwrap();
        assert!(reloaded.is_skipped("Thai Garden"));
        assert!(!reloaded.is_suggested("Burger Barn"));
    }

    #[test]
    fn rollover_is_idempotent() {
        let mut store = MemoryStore::new();
        let today = day(2024, 1, 2);
        let mut memory = DayMemory::load(&mut store, today).unwrap();
        memory.mark_skipped(&mut store, "A").unwrap();

        memory.rollover(&mut store, today).unwrap();
        memory.rollover(&mut store, today).unwrap();

        assert_eq!(memory.skipped_count(), 0);
        assert_eq!(store.get(LAST_ACTIVE_DATE_KEY).as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn ensure_day_rolls_over_only_when_date_changes() {
        let mut store = MemoryStore::new();
        let mut memory = DayMemory::load(&mut store, day(2024, 1, 2)).unwrap();
        memory.mark_suggested("A");
        memory.mark_skipped(&mut store, "B").unwrap();

        assert!(!memory.ensure_day(&mut store, day(2024, 1, 2)).unwrap());
        assert!(memory.is_suggested("A"));

        assert!(memory.ensure_day(&mut store, day(2024, 1, 3)).unwrap());
        assert!(!memory.is_suggested("A"));
        assert!(!memory.is_skipped("B"));
        assert_eq!(memory.day(), day(2024, 1, 3));
    }

    #[test]
    fn clear_suggested_keeps_skips() {
        let mut store = MemoryStore::new();
        let mut memory = DayMemory::load(&mut store, day(2024, 1, 2)).unwrap();
        memory.mark_suggested("A");
        memory.mark_skipped(&mut store, "B").unwrap();

        memory.clear_suggested();

        assert!(!memory.is_suggested("A"));
        assert!(memory.is_skipped("B"));
    }
}
