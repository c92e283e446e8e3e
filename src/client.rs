//! MangaDex API client with a transparent on-disk response cache
//!
//! [`MangaDexClient::request`] is the single path every call goes through:
//! it consults the cache, falls back to the network, decodes the envelope
//! and stores the raw body for next time. The typed accessors build a URL
//! for one endpoint and unwrap the envelope's payload.

use std::path::PathBuf;

use reqwest::header::USER_AGENT;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, trace, warn};
use url::Url;

use crate::cache::CacheManager;
use crate::data::{
    ChapterDetail, ChaptersPage, ChaptersParams, Endpoint, Envelope, Manga, MangaCover,
    API_BASE_URL,
};
use crate::error::{MangaDexError, Result};

/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("mangadex-rs/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`MangaDexClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API origin the endpoint paths are joined to
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Whether responses are read from and written to the cache
    pub cache_enabled: bool,
    /// Root directory of the response cache
    pub cache_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_enabled: true,
            cache_dir: CacheManager::default_dir(),
        }
    }
}

impl ClientConfig {
    /// Overrides the API origin (useful for testing against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the cache root directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Turns the response cache on or off
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

/// Client for the MangaDex v2 API
#[derive(Debug, Clone)]
pub struct MangaDexClient {
    http_client: Client,
    cache: CacheManager,
    config: ClientConfig,
}

impl Default for MangaDexClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl MangaDexClient {
    /// Creates a new client from the given configuration
    ///
    /// Nothing is created on disk until the first cached request.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new client with a custom HTTP client
    pub fn with_client(http_client: Client, config: ClientConfig) -> Self {
        Self {
            http_client,
            cache: CacheManager::with_dir(config.cache_dir.clone()),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cache store backing this client
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Enables reading from and writing to the response cache
    pub fn enable_cache(&mut self) {
        self.config.cache_enabled = true;
    }

    /// Disables the response cache; every call goes to the network
    pub fn disable_cache(&mut self) {
        self.config.cache_enabled = false;
    }

    /// Returns true if the response cache is in use
    pub fn cache_enabled(&self) -> bool {
        self.config.cache_enabled
    }

    /// Executes one API call, serving it from the cache when possible
    ///
    /// # Arguments
    /// * `method` - HTTP method (the API only serves `GET`)
    /// * `url` - Fully-qualified request URL including the query string
    ///
    /// # Returns
    /// * `Ok(Envelope)` - Decoded envelope, from the cache or the network
    /// * `Err(MangaDexError)` - URL, transport, status, body or JSON failure
    ///
    /// # Behavior
    /// - A cache entry that cannot be read or decoded counts as a miss
    /// - Failing to write the cache never fails the call
    /// - Nothing is cached for a failed call
    pub async fn request(&self, method: Method, url: &str) -> Result<Envelope> {
        let url = Url::parse(url)?;

        let cache_key = if self.config.cache_enabled && self.prepare_cache() {
            Some(CacheManager::key_for(url.as_str()))
        } else {
            None
        };

        if let Some(ref key) = cache_key {
            if let Some(envelope) = self.read_cached(key, &url) {
                return Ok(envelope);
            }
        }

        let body = self.fetch(method, &url).await?;

        let envelope: Envelope = serde_json::from_slice(&body).map_err(|e| {
            error!(url = %url, error = %e, "Error parsing response body");
            MangaDexError::JsonDecode(e)
        })?;

        if let Some(ref key) = cache_key {
            self.write_cached(key, &url, &body);
        }

        Ok(envelope)
    }

    /// Fetches a manga by its ID
    pub async fn get_manga(&self, manga_id: u32) -> Result<Manga> {
        self.get_data(Endpoint::Manga(manga_id), &[]).await
    }

    /// Fetches one page of chapters and their scanlation groups for a manga
    ///
    /// `params` is normalized before the URL is built, so an out-of-range
    /// limit requests the maximum page size.
    pub async fn get_chapters(&self, manga_id: u32, params: &ChaptersParams) -> Result<ChaptersPage> {
        let query = params.query_pairs();
        self.get_data(Endpoint::MangaChapters(manga_id), &query).await
    }

    /// Fetches the volume covers of a manga
    pub async fn get_covers(&self, manga_id: u32) -> Result<Vec<MangaCover>> {
        self.get_data(Endpoint::MangaCovers(manga_id), &[]).await
    }

    /// Fetches a chapter with its page list
    ///
    /// `chapter_id` is either the numeric chapter ID or the chapter hash.
    pub async fn get_chapter(&self, chapter_id: &str) -> Result<ChapterDetail> {
        self.get_data(Endpoint::Chapter(chapter_id.to_string()), &[]).await
    }

    /// Builds the endpoint URL, runs the request and decodes the payload
    ///
    /// A non-OK envelope becomes [`MangaDexError::Api`].
    async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, String)],
    ) -> Result<T> {
        let base = Url::parse(&self.config.base_url)?;
        let url = endpoint.url(&base, query)?;

        // `request` logs its own failures
        let envelope = self.request(Method::GET, url.as_str()).await?;

        envelope.into_data().inspect_err(|e| match e {
            MangaDexError::Api { code, message } => {
                warn!(endpoint = %endpoint, code, message = %message, "API returned an error status")
            }
            _ => error!(endpoint = %endpoint, error = %e, "Error decoding payload"),
        })
    }

    /// Makes sure the cache directory exists; caching is skipped for the
    /// call if it cannot be created
    fn prepare_cache(&self) -> bool {
        match self.cache.ensure_dir() {
            Ok(()) => true,
            Err(e) => {
                warn!(dir = %self.cache.dir().display(), error = %e, "Cache directory unavailable, bypassing cache");
                false
            }
        }
    }

    /// Reads and decodes a cached envelope, returning `None` on any miss
    fn read_cached(&self, key: &str, url: &Url) -> Option<Envelope> {
        if !self.cache.exists(key) {
            debug!(url = %url, "Cache not found");
            return None;
        }

        let bytes = match self.cache.read(key) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = %url, key, error = %e, "Error reading cache, falling back to network");
                return None;
            }
        };

        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => {
                debug!(url = %url, "Request loaded from cache");
                Some(envelope)
            }
            Err(e) => {
                warn!(url = %url, key, error = %e, "Unreadable cache entry, falling back to network");
                None
            }
        }
    }

    /// Stores a response body; failures are logged and swallowed
    fn write_cached(&self, key: &str, url: &Url, body: &[u8]) {
        info!(url = %url, key, "Writing cache");
        if let Err(e) = self.cache.write(key, body) {
            warn!(url = %url, error = %e, "Can't write to cache");
        }
    }

    /// Performs the live HTTP call and returns the raw body
    async fn fetch(&self, method: Method, url: &Url) -> Result<Vec<u8>> {
        trace!(method = %method, url = %url, "Making request");

        let response = self
            .http_client
            .request(method, url.clone())
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Request error");
                MangaDexError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Response status code not successful");
            return Err(MangaDexError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!(url = %url, error = %e, "Error reading body");
            MangaDexError::BodyRead(e)
        })?;

        trace!(url = %url, bytes = body.len(), "Response body received");
        Ok(body.to_vec())
    }
}
