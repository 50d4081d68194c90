//! Cached place details (rating, photo, review).
//!
//! Details are looked up once per identifier and kept forever: the whole
//! cache is loaded from the store at startup and written back in full on
//! every insert. Ratings drift slowly enough that staleness is acceptable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{read_json, write_json, KvStore, ENRICHMENT_CACHE_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRecord {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub photo_reference: Option<String>,
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(default)]
    pub is_closed: bool,
    pub cached_at: DateTime<Utc>,
}

impl EnrichmentRecord {
    /// A record with no details, stamped `cached_at`.
    #[must_use]
    pub fn empty(cached_at: DateTime<Utc>) -> Self {
        Self {
            rating: None,
            rating_count: None,
            photo_reference: None,
            review: None,
            is_closed: false,
            cached_at,
        }
    }

    /// Short "★ 4.5 (1,234)" style summary, if there is a rating.
    #[must_use]
    pub fn rating_summary(&self) -> Option<String> {
        let rating = self.rating?;
        Some(match self.rating_count {
            Some(count) => format!("★ {rating:.1} ({})", group_thousands(count)),
            None => format!("★ {rating:.1}"),
        })
    }
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Default, Clone)]
pub struct EnrichmentCache {
    entries: HashMap<String, EnrichmentRecord>,
}

impl EnrichmentCache {
    /// Load the cache from `store`. Corrupt content loads as an empty cache.
    pub fn load<S>(store: &S) -> Self
    where
        S: KvStore + ?Sized,
    {
        let entries: HashMap<String, EnrichmentRecord> = read_json(store, ENRICHMENT_CACHE_KEY);
        tracing::debug!(entries = entries.len(), "loaded enrichment cache");
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&EnrichmentRecord> {
        self.entries.get(identifier)
    }

    /// Insert `record` and flush the whole cache to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cache could not be written. The record
    /// stays cached in memory either way.
    pub fn put<S>(
        &mut self,
        store: &mut S,
        identifier: &str,
        record: EnrichmentRecord,
    ) -> Result<(), StoreError>
    where
        S: KvStore + ?Sized,
    {
        self.entries.insert(identifier.to_owned(), record);
        write_json(store, ENRICHMENT_CACHE_KEY, &self.entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
