//! Command-line interface parsing for the mangadex binary
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into the client configuration and the API call to run.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::client::ClientConfig;
use crate::data::{ChapterDetail, ChaptersParams};

/// Manga fetched when no subcommand is given
pub const DEFAULT_MANGA_ID: u32 = 2890;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--base-url` value is not an absolute URL
    #[error("Invalid base URL: '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// MangaDex CLI - fetch manga, chapters and covers from the MangaDex API
#[derive(Parser, Debug)]
#[command(name = "mangadex")]
#[command(about = "Fetch manga data from the MangaDex API with a local response cache")]
#[command(version)]
pub struct Cli {
    /// Bypass the response cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Directory holding cached responses
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// API origin the endpoint paths are joined to
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// API call to perform
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a manga
    Manga {
        /// Manga ID
        id: u32,
    },
    /// List one page of a manga's chapters
    Chapters {
        /// Manga ID
        id: u32,
        /// Page size (1-100; out-of-range values use 100)
        #[arg(long, default_value_t = 100)]
        limit: i32,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 0)]
        page: i32,
        /// Include scanlation groups
        #[arg(long)]
        block_groups: bool,
    },
    /// List a manga's volume covers
    Covers {
        /// Manga ID
        id: u32,
    },
    /// Show a chapter and its page URLs
    Chapter {
        /// Chapter ID or hash
        id: String,
    },
}

impl Command {
    /// Chapter list parameters, if this is a `chapters` command
    pub fn chapters_params(&self) -> Option<ChaptersParams> {
        match self {
            Command::Chapters {
                limit,
                page,
                block_groups,
                ..
            } => Some(ChaptersParams {
                limit: *limit,
                page: *page,
                block_groups: *block_groups,
            }),
            _ => None,
        }
    }
}

/// JSON printed by the `chapter` command: the chapter record plus the
/// resolved image URL of every page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterOutput<'a> {
    #[serde(flatten)]
    pub chapter: &'a ChapterDetail,
    pub page_urls: Vec<String>,
}

impl<'a> ChapterOutput<'a> {
    pub fn new(chapter: &'a ChapterDetail) -> Self {
        Self {
            chapter,
            page_urls: chapter.page_urls(),
        }
    }
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Client settings
    pub client: ClientConfig,
    /// Call to run
    pub command: Command,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: &'static str,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the base URL does not parse
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut client = ClientConfig::default().with_cache_enabled(!cli.no_cache);

        if let Some(ref dir) = cli.cache_dir {
            client = client.with_cache_dir(dir.clone());
        }

        if let Some(ref base_url) = cli.base_url {
            Url::parse(base_url).map_err(|source| CliError::InvalidBaseUrl {
                url: base_url.clone(),
                source,
            })?;
            client = client.with_base_url(base_url.clone());
        }

        let log_level = match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };

        Ok(StartupConfig {
            client,
            command: cli
                .command
                .clone()
                .unwrap_or(Command::Manga { id: DEFAULT_MANGA_ID }),
            log_level,
        })
    }
}
