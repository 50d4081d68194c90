//! Everything a command needs once configuration is loaded.

use std::sync::Arc;

use anyhow::Context as _;
use lunchpick_core::{AppConfig, DateKey, FileStore, LoadError, PlaceSource, Session};
use lunchpick_places::{read_places_file, HttpSettings, PlacesClient, SheetClient};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) session: Session<FileStore>,
    pub(crate) places: Option<Arc<PlacesClient>>,
    sheet: SheetClient,
}

impl Context {
    /// Open the state file and build the HTTP clients.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the day rollover
    /// cannot be written to the state file.
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let settings = HttpSettings::from_app_config(&config);
        let sheet = SheetClient::new(&settings).context("failed to build sheet client")?;

        let places = if config.enrichment_enabled() {
            let key = config.places_api_key.as_deref().unwrap_or_default();
            Some(Arc::new(
                PlacesClient::with_base_url(
                    key,
                    &settings,
                    Some(config.default_location),
                    &config.places_base_url,
                )
                .context("failed to build places client")?,
            ))
        } else {
            tracing::info!("LUNCHPICK_PLACES_API_KEY not set; place details disabled");
            None
        };

        let store = FileStore::open(&config.state_path);
        tracing::debug!(path = %store.path().display(), "opened state file");
        let session = Session::open(store, DateKey::today()).with_context(|| {
            format!("failed to write state file {}", config.state_path.display())
        })?;

        Ok(Self {
            config,
            session,
            places,
            sheet,
        })
    }

    /// Fetch the place list from the configured source into the session.
    ///
    /// # Errors
    ///
    /// [`LoadError::SourceUnavailable`] keeps the previous list;
    /// [`LoadError::EmptyPlaceSet`] means the source parsed to nothing.
    pub(crate) async fn reload(&mut self) -> Result<usize, LoadError> {
        let fetched = match &self.config.place_source {
            PlaceSource::Sheet(url) => self.sheet.fetch_csv(url).await,
            PlaceSource::File(path) => read_places_file(path).await,
        };
        self.session.load_places(fetched)
    }
}

pub(crate) fn new_rng() -> StdRng {
    StdRng::from_os_rng()
}
