//! Network side of the lunch picker: fetching the shared place sheet and
//! looking up place details (rating, photo, review, closure status).

pub mod client;
pub mod error;
pub mod http;
pub mod normalize;
pub(crate) mod retry;
pub mod sheet;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use http::HttpSettings;
pub use normalize::to_enrichment_record;
pub use sheet::{read_places_file, SheetClient};
pub use types::PlaceDetails;
