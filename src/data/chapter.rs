//! Chapter records and the pagination parameters of the chapter list endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest page size the chapter list endpoint accepts
pub const MAX_CHAPTERS_LIMIT: i32 = 100;

/// A chapter as listed by `manga/{id}/chapters`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaChapter {
    pub id: u32,
    pub hash: String,
    pub manga_id: u32,
    pub manga_title: String,
    pub volume: String,
    pub chapter: String,
    pub title: String,
    pub language: String,
    /// IDs of the scanlation groups, resolved through [`ChaptersPage::groups`]
    pub groups: Vec<u32>,
    pub uploader: u32,
    /// Unix timestamp of publication
    pub timestamp: i64,
    pub thread_id: Option<u32>,
    pub comments: Option<u32>,
    pub views: u32,
}

impl MangaChapter {
    /// Publication time, if the timestamp is set
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// A member (leader or regular) of a scanlation group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MangaGroupMember {
    pub id: u32,
    pub name: String,
}

/// A scanlation group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaGroup {
    pub id: u32,
    pub name: String,
    pub alt_names: Option<String>,
    pub language: Option<String>,
    pub leader: Option<MangaGroupMember>,
    pub members: Vec<MangaGroupMember>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub discord: Option<String>,
    pub irc_server: Option<String>,
    pub irc_channel: Option<String>,
    pub email: Option<String>,
    pub founded: Option<String>,
    pub likes: u32,
    pub follows: u32,
    pub views: u32,
    pub chapters: u32,
    pub thread_id: Option<u32>,
    pub thread_posts: Option<u32>,
    pub is_locked: bool,
    pub is_inactive: bool,
    pub delay: u32,
    pub last_updated: i64,
    pub banner: Option<String>,
}

/// Payload of `manga/{id}/chapters`
///
/// Groups are listed once for the page instead of being embedded in every
/// chapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaptersPage {
    pub chapters: Vec<MangaChapter>,
    pub groups: Vec<MangaGroup>,
}

impl ChaptersPage {
    /// Looks up a group referenced by one of the chapters
    pub fn group(&self, id: u32) -> Option<&MangaGroup> {
        self.groups.iter().find(|group| group.id == id)
    }
}

/// Group reference embedded in a chapter detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterGroup {
    pub id: u32,
    pub name: String,
}

/// Payload of `chapter/{id}`
///
/// Unlike the list entries this carries the page file names and the image
/// server they are stored on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterDetail {
    pub id: u32,
    pub hash: String,
    pub manga_id: u32,
    pub manga_title: String,
    pub volume: String,
    pub chapter: String,
    pub title: String,
    pub language: String,
    pub groups: Vec<ChapterGroup>,
    pub uploader: u32,
    pub timestamp: i64,
    pub thread_id: Option<u32>,
    pub comments: Option<u32>,
    pub views: u32,
    pub status: String,
    /// Page image file names, in reading order
    pub pages: Vec<String>,
    pub server: String,
    pub server_fallback: Option<String>,
}

impl ChapterDetail {
    /// Full image URLs for every page, in reading order
    pub fn page_urls(&self) -> Vec<String> {
        let server = self.server.trim_end_matches('/');
        self.pages
            .iter()
            .map(|page| format!("{}/{}/{}", server, self.hash, page))
            .collect()
    }
}

/// Query parameters of the chapter list endpoint
///
/// Only one page is ever requested; callers walk pages themselves by
/// bumping `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaptersParams {
    /// Page size, 1 to 100
    pub limit: i32,
    /// 1-based page number, omitted from the query when not positive
    pub page: i32,
    /// Include the scanlation group list in the response
    pub block_groups: bool,
}

impl Default for ChaptersParams {
    fn default() -> Self {
        Self {
            limit: MAX_CHAPTERS_LIMIT,
            page: 0,
            block_groups: false,
        }
    }
}

impl ChaptersParams {
    /// Returns a copy whose `limit` is within 1..=100
    ///
    /// Out-of-range values (zero, negative or above the maximum) fall back
    /// to the maximum page size.
    pub fn normalized(mut self) -> Self {
        if !(1..=MAX_CHAPTERS_LIMIT).contains(&self.limit) {
            self.limit = MAX_CHAPTERS_LIMIT;
        }
        self
    }

    /// Query pairs for this page, in key order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let params = self.normalized();
        let mut pairs = Vec::with_capacity(3);
        if params.block_groups {
            pairs.push(("blockgroups", "true".to_string()));
        }
        pairs.push(("limit", params.limit.to_string()));
        if params.page > 0 {
            pairs.push(("p", params.page.to_string()));
        }
        pairs
    }
}
