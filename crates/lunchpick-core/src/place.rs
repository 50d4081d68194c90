use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A lunch spot from the place list.
///
/// Identity is the exact, case-sensitive `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Link to learn more; empty when the source row had none.
    #[serde(default)]
    pub url: String,
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Place {}

impl std::hash::Hash for Place {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Place {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    /// Key used for enrichment lookups and the enrichment cache.
    ///
    /// The URL wins when present since it pins down one specific location;
    /// the bare name is the fallback.
    #[must_use]
    pub fn lookup_id(&self) -> &str {
        if self.url.trim().is_empty() {
            &self.name
        } else {
            &self.url
        }
    }

    /// The place's own link, or a maps search for its name.
    #[must_use]
    pub fn link(&self) -> String {
        if self.url.trim().is_empty() {
            format!(
                "{MAPS_SEARCH_URL}{}",
                utf8_percent_encode(&self.name, NON_ALPHANUMERIC)
            )
        } else {
            self.url.clone()
        }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Places in source order.
pub type PlaceSet = Vec<Place>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_id_prefers_url() {
        let place = Place::new("Joe's Pizza", "https://maps.example/x");
        assert_eq!(place.lookup_id(), "https://maps.example/x");
    }

    #[test]
    fn lookup_id_falls_back_to_name() {
        assert_eq!(Place::named("Joe's Pizza").lookup_id(), "Joe's Pizza");
        assert_eq!(Place::new("Joe's Pizza", "  ").lookup_id(), "Joe's Pizza");
    }

    #[test]
    fn equality_is_by_name_only() {
        assert_eq!(
            Place::new("Noodle Bar", "https://a.example"),
            Place::new("Noodle Bar", "https://b.example")
        );
        assert_ne!(Place::named("Noodle Bar"), Place::named("noodle bar"));
    }

    #[test]
    fn link_builds_search_url_without_own_url() {
        let link = Place::named("Café & Bar").link();
        assert_eq!(
            link,
            "https://www.google.com/maps/search/?api=1&query=Caf%C3%A9%20%26%20Bar"
        );
    }

    #[test]
    fn link_uses_own_url_when_present() {
        let place = Place::new("Joe's", "https://maps.example/x");
        assert_eq!(place.link(), "https://maps.example/x");
    }
}
