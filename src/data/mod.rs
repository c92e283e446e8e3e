//! Core data models for the MangaDex v2 API
//!
//! Every endpoint wraps its payload in an [`Envelope`]. The typed records in
//! the submodules mirror the `data` payloads of the supported endpoints.

pub mod chapter;
pub mod endpoints;
pub mod manga;

pub use chapter::{
    ChapterDetail, ChapterGroup, ChaptersPage, ChaptersParams, MangaChapter, MangaGroup,
    MangaGroupMember,
};
pub use endpoints::{Endpoint, API_BASE_URL};
pub use manga::{Manga, MangaCover, MangaLinks, MangaPublication, MangaRating, MangaRelation};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{MangaDexError, Result};

/// Status string reported by successful envelopes
pub const STATUS_OK: &str = "OK";

/// Outer JSON object returned by every endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    /// Same as the HTTP status code
    pub code: u16,
    /// `OK` or `error`
    pub status: String,
    /// Present if status is not `OK`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Requested payload, only meaningful when status is `OK`
    pub data: serde_json::Value,
}

impl Envelope {
    /// Returns true if the envelope carries a usable payload
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Decodes the payload into `T`
    ///
    /// # Returns
    /// * `Ok(T)` if the status is `OK` and `data` matches `T`
    /// * `Err(MangaDexError::Api)` if the status is not `OK`
    /// * `Err(MangaDexError::JsonDecode)` if `data` does not match `T`
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_ok() {
            return Err(MangaDexError::Api {
                code: self.code,
                message: self.message.unwrap_or_else(|| self.status.clone()),
            });
        }
        Ok(serde_json::from_value(self.data)?)
    }
}
