//! Repository access layer
//!
//! Wraps the API calls so that every outcome, including transport and decode
//! failures, comes back as a plain `Result` the view-model can branch on.

use std::sync::Arc;

use crate::api::GithubApi;
use crate::error::Result;
use crate::types::{Repository, User};

#[derive(Clone)]
pub struct GithubRepository {
    api: Arc<dyn GithubApi>,
}

impl GithubRepository {
    pub fn new(api: Arc<dyn GithubApi>) -> Self {
        Self { api }
    }

    pub async fn fetch_user(&self, user_id: &str) -> Result<User> {
        self.api
            .get_user(user_id)
            .await
            .inspect_err(|e| tracing::warn!(user_id, endpoint = "users", "User fetch failed: {}", e))
    }

    pub async fn fetch_repositories(&self, user_id: &str) -> Result<Vec<Repository>> {
        let repos = self
            .api
            .get_user_repos(user_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(user_id, endpoint = "repos", "Repository fetch failed: {}", e)
            })?;

        tracing::debug!(user_id, count = repos.len(), "Fetched repositories");
        Ok(repos)
    }
}
