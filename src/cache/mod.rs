//! Cache module for storing raw API responses on disk
//!
//! Each cached request is one file named after a SHA-256 digest of the full
//! request URL. Bodies are stored exactly as received so a cache hit decodes
//! the same bytes the network returned. Entries are never expired.

mod manager;

pub use manager::{CacheError, CacheManager};
