//! Core types for Reposcout

use serde::{Deserialize, Deserializer, Serialize};

/// Repositories with more forks than this get the high-fork badge.
pub const POPULAR_FORK_THRESHOLD: u64 = 5000;

/// A GitHub user profile as returned by `GET /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name. GitHub sends `null` for accounts without one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, avatar_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            avatar_url,
        }
    }

    /// Name to render in the profile section
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }
}

/// A repository entry from `GET /users/{id}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub updated_at: String,
    pub stargazers_count: u64,
    pub forks: u64,
}

impl Repository {
    /// True when the repository qualifies for the high-fork badge
    pub fn is_popular(&self) -> bool {
        self.forks > POPULAR_FORK_THRESHOLD
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
