//! Suggestion-rotation engine for the lunch picker.
//!
//! Parses the place list, remembers what was shown and skipped today, picks
//! the next place with tiered fallback, derives a stable accent per place,
//! and caches looked-up place details. Network I/O lives elsewhere; this
//! crate only needs a [`KvStore`] for durable state.

pub mod accent;
pub mod app_config;
pub mod config;
pub mod day_memory;
pub mod enrichment;
pub mod error;
pub mod parse;
pub mod place;
pub mod selector;
pub mod session;
pub mod store;

pub use accent::{accent_for, derive_accent, name_hash, Gradient, PALETTE};
pub use app_config::{AppConfig, Environment, LatLng, PlaceSource};
pub use config::{load_app_config, load_app_config_from_env};
pub use day_memory::{is_new_day, DateKey, DayMemory};
pub use enrichment::{EnrichmentCache, EnrichmentRecord, Review};
pub use error::{ConfigError, CoreError, LoadError, StoreError};
pub use parse::{parse_places, split_fields};
pub use place::{Place, PlaceSet};
pub use selector::{pick, Pick, Tier};
pub use session::{Session, Suggestion, Ticket};
pub use store::{FileStore, KvStore, MemoryStore};
