//! Wire types for the random-user API.
//!
//! These structs mirror the JSON payload returned by
//! `GET <base>?results=N&seed=S&page=P`. Records are immutable once fetched;
//! the cache stores them exactly as received.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Street {
    pub number: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    pub country: String,
    // The API mixes numeric and string postcodes depending on nationality
    pub postcode: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dob {
    pub date: String,
    pub age: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Login {
    pub uuid: String,
    pub username: String,
}

/// One raw user record as received from the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUser {
    pub name: Name,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub nat: String,
    pub picture: Picture,
    pub location: Location,
    pub dob: Dob,
    pub login: Login,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub seed: String,
    pub results: u32,
    pub page: u32,
}

/// Top-level response body: `{ results: [...], info: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResult {
    pub results: Vec<RawUser>,
    pub info: ApiInfo,
}

#[cfg(test)]
impl RawUser {
    /// Minimal record for tests; only the fields the transform reads vary.
    pub(crate) fn sample(first: &str, last: &str, email: &str, nat: &str, uuid: &str) -> Self {
        Self {
            name: Name {
                title: "Mr".to_string(),
                first: first.to_string(),
                last: last.to_string(),
            },
            email: email.to_string(),
            phone: "555-0100".to_string(),
            gender: "male".to_string(),
            nat: nat.to_string(),
            picture: Picture {
                large: format!("https://example.com/{uuid}/large.jpg"),
                medium: format!("https://example.com/{uuid}/med.jpg"),
                thumbnail: format!("https://example.com/{uuid}/thumb.jpg"),
            },
            location: Location {
                street: Street {
                    number: 1,
                    name: "Main St".to_string(),
                },
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                country: "United States".to_string(),
                postcode: serde_json::json!(62704),
            },
            dob: Dob {
                date: "1990-01-01T00:00:00.000Z".to_string(),
                age: 36,
            },
            login: Login {
                uuid: uuid.to_string(),
                username: format!("{}.{}", first.to_lowercase(), last.to_lowercase()),
            },
        }
    }
}
