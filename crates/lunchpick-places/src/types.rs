//! Places API response types.
//!
//! Every response carries a `status` string (`"OK"`, `"ZERO_RESULTS"`,
//! `"REQUEST_DENIED"`, ...) and, on failure, an `error_message`.

use serde::Deserialize;

/// Access to the status envelope shared by every response.
pub(crate) trait ApiStatus {
    fn status(&self) -> &str;
    fn error_message(&self) -> Option<&str>;
}

macro_rules! impl_api_status {
    ($($ty:ty),*) => {
        $(impl ApiStatus for $ty {
            fn status(&self) -> &str {
                &self.status
            }

            fn error_message(&self) -> Option<&str> {
                self.error_message.as_deref()
            }
        })*
    };
}

impl_api_status!(FindPlaceResponse, DetailsResponse);

/// `findplacefromtext` response.
#[derive(Debug, Deserialize)]
pub struct FindPlaceResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `details` response.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// The subset of place details the picker shows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
    /// `OPERATIONAL`, `CLOSED_TEMPORARILY`, or `CLOSED_PERMANENTLY`.
    #[serde(default)]
    pub business_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: String,
}
