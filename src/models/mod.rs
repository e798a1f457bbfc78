//! Data models for the user directory.
//!
//! Two layers:
//!
//! - `user`: raw wire types as fetched from the data source (`RawUser`,
//!   `ApiResult`). These are what the page cache stores.
//! - `view`: enriched, ephemeral types produced by the transform engine
//!   (`ViewUser`, `UserGroup`, `Processed`), plus the `GroupBy` selector.

pub mod user;
pub mod view;

pub use user::{ApiInfo, ApiResult, Dob, Location, Login, Name, Picture, RawUser, Street};
pub use view::{GroupBy, Processed, UserGroup, ViewUser};
