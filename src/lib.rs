//! userdex - a paginated user directory cache with background grouping.
//!
//! Fetches pages of user records from a seeded random-user API, caches raw
//! pages locally with a 10-minute TTL (memory plus a best-effort disk
//! mirror), and runs enrichment/grouping/filtering on a dedicated worker
//! thread so large pages never block the caller.
//!
//! Entry point is [`service::UserService`]; see the `userdex` binary for a
//! minimal wiring example.

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod models;
pub mod service;
pub mod worker;

pub use api::{ApiClient, ApiError, FetchUsers};
pub use cache::PageCache;
pub use config::Config;
pub use models::{GroupBy, Processed, RawUser, UserGroup, ViewUser};
pub use service::UserService;
pub use worker::WorkerHandle;
