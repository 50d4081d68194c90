//! HTTP client for the places-details API.
//!
//! A lookup resolves a place to an API place id (straight from its link when
//! the link carries one, otherwise through a text search biased to the home
//! location) and then fetches rating, photos, reviews, and business status.
//! "No match" is `Ok(None)`, not an error.

use lunchpick_core::{LatLng, Place};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::http::HttpSettings;
use crate::retry::retry_with_backoff;
use crate::types::{ApiStatus, DetailsResponse, FindPlaceResponse, PlaceDetails};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

const DETAIL_FIELDS: &str = "name,rating,user_ratings_total,photos,reviews,business_status";

/// Radius in meters for the text-search location bias.
const BIAS_RADIUS_M: u32 = 5_000;

/// Client for the places-details API.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    location: Option<LatLng>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        settings: &HttpSettings,
        location: Option<LatLng>,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, settings, location, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        settings: &HttpSettings,
        location: Option<LatLng>,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        // Exactly one trailing slash so relative joins append rather than
        // replace the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: settings.build_client()?,
            api_key: api_key.to_owned(),
            base_url,
            location,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Look up details for `place`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API reports a failure status.
    /// - [`PlacesError::Http`] / [`PlacesError::UnexpectedStatus`] on transport failure.
    /// - [`PlacesError::Deserialize`] if a response does not match the expected shape.
    pub async fn lookup(&self, place: &Place) -> Result<Option<PlaceDetails>, PlacesError> {
        let place_id = match place_id_from_link(&place.url) {
            Some(id) => id,
            None => {
                let query = search_text(place);
                match self.find_place(&query).await? {
                    Some(id) => id,
                    None => {
                        tracing::debug!(place = %place.name, "no places match");
                        return Ok(None);
                    }
                }
            }
        };
        self.place_details(&place_id).await
    }

    /// Resolve free text to the best-matching place id.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::lookup`].
    pub async fn find_place(&self, query: &str) -> Result<Option<String>, PlacesError> {
        let bias = self.location.map(|loc| {
            format!("circle:{BIAS_RADIUS_M}@{},{}", loc.lat, loc.lng)
        });
        let mut params = vec![
            ("input", query),
            ("inputtype", "textquery"),
            ("fields", "place_id,name"),
        ];
        if let Some(bias) = &bias {
            params.push(("locationbias", bias.as_str()));
        }

        let url = self.build_url("findplacefromtext/json", &params)?;
        let response: Option<FindPlaceResponse> = self
            .request_json(&url, &format!("findplacefromtext(input={query})"))
            .await?;

        Ok(response
            .and_then(|r| r.candidates.into_iter().next())
            .map(|c| c.place_id))
    }

    /// Fetch details for a known place id.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::lookup`].
    pub async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        let response: Option<DetailsResponse> = self
            .request_json(&url, &format!("details(place_id={place_id})"))
            .await?;

        Ok(response.and_then(|r| r.result))
    }

    /// Link to a photo by its reference, scaled to `max_width` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if the photo endpoint cannot
    /// be joined onto the base URL.
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> Result<Url, PlacesError> {
        let width = max_width.to_string();
        self.build_url(
            "photo",
            &[("maxwidth", &width), ("photo_reference", photo_reference)],
        )
    }

    /// Builds the request URL with percent-encoded query parameters and the
    /// API key appended last.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET with retry, asserts a 2xx status, parses the JSON body,
    /// and checks the API status field. `Ok(None)` means "no match".
    async fn request_json<T>(&self, url: &Url, context: &str) -> Result<Option<T>, PlacesError>
    where
        T: DeserializeOwned + ApiStatus,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            // Transport errors carry the request URL, key included.
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| PlacesError::Http(e.without_url()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(PlacesError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: redact_key(url),
                });
            }
            let body = response
                .text()
                .await
                .map_err(|e| PlacesError::Http(e.without_url()))?;
            let parsed: T =
                serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })?;

            if Self::check_status(parsed.status(), parsed.error_message())? {
                Ok(Some(parsed))
            } else {
                Ok(None)
            }
        })
        .await
    }

    /// `Ok(true)` for results, `Ok(false)` for "no match", `Err` otherwise.
    fn check_status(status: &str, message: Option<&str>) -> Result<bool, PlacesError> {
        match status {
            "OK" => Ok(true),
            "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
            other => Err(PlacesError::Api {
                status: other.to_owned(),
                message: message.unwrap_or("no error message").to_owned(),
            }),
        }
    }
}

/// Text to search for: a `query`/`q` parameter in the place's link, else its name.
fn search_text(place: &Place) -> String {
    Url::parse(place.url.trim())
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, v)| (k == "query" || k == "q") && !v.trim().is_empty())
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_else(|| place.name.clone())
}

/// Place id embedded in a maps link (`query_place_id=` or `place_id=`).
fn place_id_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    url.query_pairs()
        .find(|(k, v)| (k == "query_place_id" || k == "place_id") && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

/// The request URL without its `key` parameter, for error messages.
fn redact_key(url: &Url) -> String {
    let mut clean = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    clean.query_pairs_mut().clear().extend_pairs(kept);
    clean.to_string()
}
