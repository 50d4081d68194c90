use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the raw place list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceSource {
    /// Published CSV export of a spreadsheet, fetched over HTTP.
    Sheet(String),
    /// Local CSV file on disk.
    File(PathBuf),
}

/// Latitude/longitude pair used to bias place lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub place_source: PlaceSource,
    pub sheet_edit_url: Option<String>,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub default_location: LatLng,
    pub state_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Enrichment lookups only run when an API key is configured.
    #[must_use]
    pub fn enrichment_enabled(&self) -> bool {
        self.places_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("place_source", &self.place_source)
            .field("sheet_edit_url", &self.sheet_edit_url)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("default_location", &self.default_location)
            .field("state_path", &self.state_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
