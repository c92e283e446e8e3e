//! Mapping from API resources to request URLs

use std::fmt;
use url::Url;

/// Base URL for the MangaDex v2 API
pub const API_BASE_URL: &str = "https://api.mangadex.org/v2/";

/// A resource exposed by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `manga/{id}`
    Manga(u32),
    /// `manga/{id}/chapters`
    MangaChapters(u32),
    /// `manga/{id}/covers`
    MangaCovers(u32),
    /// `chapter/{id}`, where the id is either numeric or a chapter hash
    Chapter(String),
}

impl Endpoint {
    /// Path of the resource relative to the API base
    pub fn path(&self) -> String {
        match self {
            Endpoint::Manga(id) => format!("manga/{}", id),
            Endpoint::MangaChapters(id) => format!("manga/{}/chapters", id),
            Endpoint::MangaCovers(id) => format!("manga/{}/covers", id),
            Endpoint::Chapter(id) => format!("chapter/{}", id),
        }
    }

    /// Builds the full request URL
    ///
    /// # Arguments
    /// * `base` - API origin; a missing trailing slash is tolerated
    /// * `query` - Query pairs appended in order, omitted entirely when empty
    pub fn url(&self, base: &Url, query: &[(&str, String)]) -> Result<Url, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base.join(&self.path())?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
