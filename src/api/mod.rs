//! HTTP client module for the random-user data source.
//!
//! This module provides the `ApiClient` for fetching pages of user records,
//! and the `FetchUsers` trait the orchestrator depends on so tests can
//! substitute a stub transport.
//!
//! The API is unauthenticated; a fixed seed keeps pagination deterministic
//! across calls.

pub mod client;
pub mod error;

pub use client::{ApiClient, FetchUsers};
pub use error::ApiError;
