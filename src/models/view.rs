//! Derived view types produced by the transform engine.
//!
//! Everything here is ephemeral: recomputed on each grouping request and
//! discarded after delivery. Only raw pages are cached.

use serde::Serialize;

use super::RawUser;

/// Attribute used to bucket users into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    /// Bucket by nationality code (e.g. "US", "FR").
    #[default]
    Nationality,
    /// Bucket by uppercased first letter of the first name.
    Alphabetic,
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Nationality => write!(f, "nationality"),
            GroupBy::Alphabetic => write!(f, "alphabetic"),
        }
    }
}

/// One enriched user record ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct ViewUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub nat: String,
    /// Number of records sharing this nationality within the processed set.
    pub nat_count: usize,
    /// Medium-resolution image URL with a uniqueness suffix.
    pub image_src: String,
    /// The original record, kept for detail expansion.
    pub raw: RawUser,
}

/// A titled bucket of users. Groups are sorted ascending by title.
#[derive(Debug, Clone, Serialize)]
pub struct UserGroup {
    pub title: String,
    pub users: Vec<ViewUser>,
}

/// Result of one transform request: the full enriched set plus its grouping.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Processed {
    pub all_users: Vec<ViewUser>,
    pub groups: Vec<UserGroup>,
}
