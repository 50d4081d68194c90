//! Picker session state and the operations a front end drives.
//!
//! A [`Session`] owns the loaded places, the current suggestion, today's
//! memory, the enrichment cache, and the durable store behind them. Every
//! suggestion gets a fresh [`Ticket`]; enrichment that resolves after a newer
//! suggestion (or a hide) carries a stale ticket and is not displayed.

use rand::Rng;

use crate::accent::{accent_for, Gradient};
use crate::day_memory::{DateKey, DayMemory};
use crate::enrichment::{EnrichmentCache, EnrichmentRecord};
use crate::error::{CoreError, LoadError, StoreError};
use crate::parse::parse_places;
use crate::place::{Place, PlaceSet};
use crate::selector::{pick, Tier};
use crate::store::KvStore;

/// Identifies one shown suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Suggestion {
    pub place: Place,
    pub accent: Gradient,
    pub tier: Tier,
    pub ticket: Ticket,
    /// Details already in the cache; `None` means a lookup is worthwhile.
    pub cached: Option<EnrichmentRecord>,
}

pub struct Session<S: KvStore> {
    store: S,
    places: PlaceSet,
    current: Option<Place>,
    memory: DayMemory,
    cache: EnrichmentCache,
    generation: u64,
}

impl<S: KvStore> Session<S> {
    /// Start a session over `store`, rolling today's memory over if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a day rollover could not be persisted.
    pub fn open(mut store: S, today: DateKey) -> Result<Self, StoreError> {
        let memory = DayMemory::load(&mut store, today)?;
        let cache = EnrichmentCache::load(&store);
        Ok(Self {
            store,
            places: Vec::new(),
            current: None,
            memory,
            cache,
            generation: 0,
        })
    }

    /// Replace the place list with the parsed result of a source fetch.
    ///
    /// A failed fetch leaves the current list untouched and reports
    /// [`LoadError::SourceUnavailable`]. A fetch that parses to nothing
    /// empties the list and reports [`LoadError::EmptyPlaceSet`].
    ///
    /// # Errors
    ///
    /// See above; both cases are recoverable by retrying.
    pub fn load_places<E>(&mut self, fetched: Result<String, E>) -> Result<usize, LoadError>
    where
        E: std::fmt::Display,
    {
        let raw = fetched.map_err(|e| {
            tracing::warn!(error = %e, "place source unavailable");
            LoadError::SourceUnavailable(e.to_string())
        })?;

        self.replace_places(parse_places(&raw));
        if self.places.is_empty() {
            return Err(LoadError::EmptyPlaceSet);
        }
        tracing::info!(count = self.places.len(), "loaded places");
        Ok(self.places.len())
    }

    /// Swap in a new place list wholesale.
    ///
    /// The current suggestion is dropped if it is no longer listed.
    pub fn replace_places(&mut self, places: PlaceSet) {
        self.places = places;
        if let Some(current) = &self.current {
            if !self.places.contains(current) {
                self.hide();
            }
        }
    }

    /// Pick, mark, and show the next place.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyPlaceSet`] if no places are loaded.
    pub fn suggest<R>(&mut self, today: DateKey, rng: &mut R) -> Result<Suggestion, CoreError>
    where
        R: Rng + ?Sized,
    {
        if self.places.is_empty() {
            return Err(CoreError::EmptyPlaceSet);
        }
        if let Err(e) = self.memory.ensure_day(&mut self.store, today) {
            tracing::warn!(error = %e, "could not persist day rollover");
        }

        let chosen = pick(&self.places, &mut self.memory, self.current.as_ref(), rng)?;
        let place = chosen.place.clone();
        let tier = chosen.tier;

        self.memory.mark_suggested(&place.name);
        self.current = Some(place.clone());
        self.generation += 1;

        tracing::debug!(place = %place.name, %tier, "suggesting");

        Ok(Suggestion {
            accent: accent_for(&place.name),
            cached: self.cache.get(place.lookup_id()).cloned(),
            ticket: Ticket(self.generation),
            tier,
            place,
        })
    }

    /// "Not today": remember the current place as skipped, then suggest the
    /// next one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyPlaceSet`] if no places are loaded.
    pub fn not_today<R>(&mut self, today: DateKey, rng: &mut R) -> Result<Suggestion, CoreError>
    where
        R: Rng + ?Sized,
    {
        if self.places.is_empty() {
            return Err(CoreError::EmptyPlaceSet);
        }
        if let Err(e) = self.memory.ensure_day(&mut self.store, today) {
            tracing::warn!(error = %e, "could not persist day rollover");
        }
        if let Some(current) = &self.current {
            if let Err(e) = self.memory.mark_skipped(&mut self.store, &current.name) {
                tracing::warn!(place = %current.name, error = %e, "could not persist skip");
            }
        }
        self.suggest(today, rng)
    }

    /// Stop showing the current suggestion. Pending enrichment becomes stale.
    pub fn hide(&mut self) {
        self.current = None;
        self.generation += 1;
    }

    /// "Never again": hide the current place and hand it back.
    ///
    /// The list itself is owned by the source; removal happens there.
    pub fn never_again(&mut self) -> Option<Place> {
        let place = self.current.take();
        if place.is_some() {
            self.generation += 1;
        }
        place
    }

    /// Whether `ticket` still names the suggestion on display.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.is_some() && ticket == Ticket(self.generation)
    }

    /// Accept a finished lookup for `identifier`, issued under `ticket`.
    ///
    /// Found details are cached regardless of staleness. The record is
    /// returned for display only if `ticket` is still current.
    pub fn apply_enrichment(
        &mut self,
        ticket: Ticket,
        identifier: &str,
        record: Option<EnrichmentRecord>,
    ) -> Option<&EnrichmentRecord> {
        if let Some(record) = record {
            if let Err(e) = self.cache.put(&mut self.store, identifier, record) {
                tracing::warn!(identifier, error = %e, "could not persist enrichment cache");
            }
        }
        if !self.is_current(ticket) {
            tracing::debug!(identifier, "discarding enrichment for a superseded suggestion");
            return None;
        }
        self.cache.get(identifier)
    }

    #[must_use]
    pub fn cached_details(&self, place: &Place) -> Option<&EnrichmentRecord> {
        self.cache.get(place.lookup_id())
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn current(&self) -> Option<&Place> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn memory(&self) -> &DayMemory {
        &self.memory
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
