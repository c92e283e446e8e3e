//! Manga records returned by the `manga/{id}` and `manga/{id}/covers` endpoints

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A manga title with its metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manga {
    pub id: u32,
    pub title: String,
    #[serde(rename = "altTitles")]
    pub alternative_titles: Vec<String>,
    pub description: String,
    pub artist: Vec<String>,
    pub author: Vec<String>,
    pub publication: MangaPublication,
    pub tags: Vec<u16>,
    pub last_chapter: Option<String>,
    pub last_volume: Option<String>,
    /// Unix timestamp of the most recent upload
    pub last_uploaded: i64,
    pub is_hentai: bool,
    #[serde(deserialize_with = "deserialize_links")]
    pub links: MangaLinks,
    pub relations: Vec<MangaRelation>,
    pub rating: MangaRating,
    pub views: u64,
    pub follows: u64,
    pub comments: u64,
    #[serde(rename = "mainCover")]
    pub cover: String,
}

impl Manga {
    /// Time of the most recent upload, if the timestamp is set
    pub fn last_uploaded_at(&self) -> Option<DateTime<Utc>> {
        if self.last_uploaded <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.last_uploaded, 0)
    }
}

/// Publication details of a manga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaPublication {
    pub language: String,
    /// 1 ongoing, 2 completed, 3 cancelled, 4 hiatus
    pub status: u8,
    pub demographic: u8,
}

/// Aggregated user rating
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaRating {
    pub bayesian: f32,
    pub mean: f32,
    pub users: u32,
}

/// External site identifiers for a manga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaLinks {
    #[serde(rename = "al", skip_serializing_if = "Option::is_none")]
    pub anilist: Option<String>,
    #[serde(rename = "ap", skip_serializing_if = "Option::is_none")]
    pub anime_planet: Option<String>,
    #[serde(rename = "bw", skip_serializing_if = "Option::is_none")]
    pub book_walker: Option<String>,
    #[serde(rename = "kt", skip_serializing_if = "Option::is_none")]
    pub kitsu: Option<String>,
    #[serde(rename = "mu", skip_serializing_if = "Option::is_none")]
    pub manga_updates: Option<String>,
    #[serde(rename = "amz", skip_serializing_if = "Option::is_none")]
    pub amazon: Option<String>,
    #[serde(rename = "ebj", skip_serializing_if = "Option::is_none")]
    pub ebook_japan: Option<String>,
    #[serde(rename = "mal", skip_serializing_if = "Option::is_none")]
    pub my_anime_list: Option<String>,
    #[serde(rename = "raw", skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(rename = "engtl", skip_serializing_if = "Option::is_none")]
    pub english_raw: Option<String>,
}

/// The API encodes "no links" as an empty array instead of an object
fn deserialize_links<'de, D>(deserializer: D) -> Result<MangaLinks, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(_) | serde_json::Value::Null => Ok(MangaLinks::default()),
        value @ serde_json::Value::Object(_) => {
            MangaLinks::deserialize(value).map_err(D::Error::custom)
        }
        other => Err(D::Error::custom(format!(
            "expected links object or array, found {}",
            other
        ))),
    }
}

/// A related title (prequel, spin-off, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaRelation {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub relation_type: u8,
    pub is_hentai: bool,
}

/// A volume cover image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaCover {
    pub volume: String,
    pub url: String,
}
