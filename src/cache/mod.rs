//! Local page caching module.
//!
//! This module provides the `PageCache` for storing raw user pages keyed by
//! page number. Pages are cached in memory, mirrored to JSON files on disk,
//! and considered stale after 10 minutes.
//!
//! The in-memory map is authoritative for the session; the disk mirror is
//! best-effort and its absence degrades the cache to memory-only.

pub mod store;

pub use store::{CacheEntry, PageCache, CACHE_TTL_MINUTES};
