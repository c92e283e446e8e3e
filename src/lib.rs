//! Cached client for the MangaDex v2 API
//!
//! This crate exposes the request pipeline, the response cache and the typed
//! API records, plus the CLI parsing used by the `mangadex` binary.

pub mod cache;
pub mod cli;
pub mod client;
pub mod data;
pub mod error;

pub use client::{ClientConfig, MangaDexClient};
pub use error::{MangaDexError, Result};
pub use reqwest::Method;
