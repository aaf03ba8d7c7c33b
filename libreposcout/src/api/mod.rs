//! GitHub API abstraction
//!
//! The `GithubApi` trait covers the two endpoints Reposcout reads:
//! `GET /users/{id}` and `GET /users/{id}/repos`. `HttpGithubApi` talks to
//! the real service with reqwest; `MockGithubApi` serves canned data for
//! tests and the offline demo.
//!
//! # Examples
//!
//! ```no_run
//! use libreposcout::api::{GithubApi, github::HttpGithubApi};
//! use libreposcout::config::ApiConfig;
//!
//! # async fn example() -> libreposcout::Result<()> {
//! let api = HttpGithubApi::new(&ApiConfig::default())?;
//! let user = api.get_user("octocat").await?;
//! let repos = api.get_user_repos("octocat").await?;
//! println!("{} has {} public repositories", user.display_name(), repos.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Repository, User};

pub mod github;

// Mock API is available for all builds (not just tests) to support integration tests
// and the offline demo mode of the terminal UI
pub mod mock;

/// Read access to GitHub user data
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Fetch a user profile
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown users, `ApiError::Network` for
    /// transport failures and `ApiError::Decode` when the payload does not match.
    async fn get_user(&self, user_id: &str) -> Result<User>;

    /// Fetch the public repositories of a user
    async fn get_user_repos(&self, user_id: &str) -> Result<Vec<Repository>>;
}
