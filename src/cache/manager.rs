//! Cache manager for persisting raw API responses to disk
//!
//! Provides a `CacheManager` that maps a request URL to a byte blob stored in
//! a per-user cache directory.

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Application directory name used under the platform cache root
const APP_NAME: &str = "mangadex";

/// Errors raised by the cache store
#[derive(Debug, Error)]
pub enum CacheError {
    /// No entry exists for the requested key
    #[error("Cache entry not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure while reading or writing an entry
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manages reading and writing cached response bodies
///
/// The cache manager stores files in an XDG-compliant cache directory
/// (`~/.cache/mangadex/` on Linux). The directory is only created when an
/// entry is about to be read or written, so constructing a manager never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheManager {
    /// Creates a new CacheManager rooted at [`CacheManager::default_dir`]
    pub fn new() -> Self {
        Self::with_dir(Self::default_dir())
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Default cache root, falling back to the system temp directory when
    /// no per-user cache directory is available
    pub fn default_dir() -> PathBuf {
        match ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.cache_dir().to_path_buf(),
            None => std::env::temp_dir().join(APP_NAME),
        }
    }

    /// Returns the root directory of this cache
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Derives the cache key for a request URL
    ///
    /// The key is the hex SHA-256 of the complete URL string, so two requests
    /// for the same path with different query strings never share an entry.
    /// URLs are hashed in their parsed form, so spellings that parse to the
    /// same URL (`a b` and `a%20b`) share a key. Unparseable input is hashed
    /// as given.
    pub fn key_for(url: &str) -> String {
        let normalized = match Url::parse(url) {
            Ok(parsed) => String::from(parsed),
            Err(_) => url.to_string(),
        };
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Returns the path to a cache file for the given key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    /// Returns true if a regular file is stored under `key`
    pub fn exists(&self, key: &str) -> bool {
        fs::metadata(self.path_for(key))
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Ensures the cache directory exists
    ///
    /// Safe to call any number of times.
    pub fn ensure_dir(&self) -> Result<(), CacheError> {
        if !self.cache_dir.is_dir() {
            info!(dir = %self.cache_dir.display(), "Cache directory does not exist, creating");
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Reads the raw bytes stored under `key`
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` with the stored bytes
    /// * `Err(CacheError::NotFound)` if there is no entry for the key
    /// * `Err(CacheError::Io)` if the file exists but cannot be read
    pub fn read(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        let path = self.path_for(key);
        if !self.exists(key) {
            return Err(CacheError::NotFound(path));
        }
        Ok(fs::read(path)?)
    }

    /// Stores `bytes` under `key`, replacing any previous entry
    pub fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.ensure_dir()?;
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[test]
    fn test_key_for_differs_by_query_string() {
        let first = CacheManager::key_for("https://api.mangadex.org/v2/manga/1/chapters?limit=100&p=1");
        let second = CacheManager::key_for("https://api.mangadex.org/v2/manga/1/chapters?limit=100&p=2");
        assert_ne!(first, second, "Pages of the same path must not alias");
    }

    #[test]
    fn test_key_for_is_deterministic_hex() {
        let url = "https://api.mangadex.org/v2/manga/2890";
        let key = CacheManager::key_for(url);
        assert_eq!(key, CacheManager::key_for(url));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_write_then_read_returns_identical_bytes() {
        let (cache, _temp_dir) = create_test_cache();
        let body = br#"{"code":200,"status":"OK","data":{"id":1}}"#;

        cache.write("entry", body).expect("Write should succeed");
        let read = cache.read("entry").expect("Read should succeed");

        assert_eq!(read, body.to_vec());
    }

    #[test]
    fn test_read_missing_key_is_not_found() {
        let (cache, _temp_dir) = create_test_cache();

        let result = cache.read("missing");

        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_exists_ignores_directories() {
        let (cache, temp_dir) = create_test_cache();
        fs::create_dir(temp_dir.path().join("a_directory")).unwrap();

        assert!(!cache.exists("a_directory"));
        assert!(matches!(cache.read("a_directory"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_exists_after_write() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(!cache.exists("key"));

        cache.write("key", b"bytes").unwrap();

        assert!(cache.exists("key"));
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache");
        let cache = CacheManager::with_dir(nested_path.clone());

        cache.write("nested_key", b"{}").expect("Write should succeed");

        assert!(nested_path.join("nested_key").is_file());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::with_dir(temp_dir.path().join("root"));

        cache.ensure_dir().unwrap();
        cache.ensure_dir().unwrap();

        assert!(cache.dir().is_dir());
    }

    #[test]
    fn test_with_dir_does_not_create_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("lazy");

        let _cache = CacheManager::with_dir(root.clone());

        assert!(!root.exists());
    }

    #[test]
    fn test_write_into_unwritable_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"not a dir").unwrap();
        let cache = CacheManager::with_dir(blocker.join("cache"));

        assert!(matches!(cache.write("key", b"x"), Err(CacheError::Io(_))));
    }

    #[test]
    fn test_key_for_hashes_parsed_url() {
        let raw = CacheManager::key_for("http://127.0.0.1:8080/v2/manga/1?x=a b");
        let encoded = CacheManager::key_for("http://127.0.0.1:8080/v2/manga/1?x=a%20b");
        assert_eq!(raw, encoded);
        assert_eq!(
            CacheManager::key_for("HTTP://Example.com:80/v2/manga/1"),
            CacheManager::key_for("http://example.com/v2/manga/1")
        );
    }

    #[test]
    fn test_new_uses_default_dir() {
        let cache = CacheManager::new();
        assert_eq!(cache.dir(), CacheManager::default_dir().as_path());
        assert!(cache.dir().to_string_lossy().contains("mangadex"));
        assert!(CacheManager::default().dir().to_string_lossy().contains("mangadex"));
    }

    #[test]
    fn test_default_dir_names_application() {
        let dir = CacheManager::default_dir();
        assert!(dir.to_string_lossy().contains("mangadex"));
    }
}
