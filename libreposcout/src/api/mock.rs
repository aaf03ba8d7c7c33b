//! Mock GitHub API for testing
//!
//! Serves canned users and repositories, can simulate failures and latency,
//! and counts calls per endpoint so tests can assert that a search did or did
//! not reach the network.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::GithubApi;
use crate::error::{ApiError, Result};
use crate::types::{Repository, User};

/// Configuration for mock API behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Response for `get_user`
    pub user: std::result::Result<User, ApiError>,

    /// Response for `get_user_repos`
    pub repos: std::result::Result<Vec<Repository>, ApiError>,

    /// When set, only this user id resolves; any other id is `NotFound`
    pub login: Option<String>,

    /// Delay before completing each request (simulates network latency)
    pub delay: Duration,

    /// Number of times `get_user` has been called
    pub user_call_count: Arc<Mutex<usize>>,

    /// Number of times `get_user_repos` has been called
    pub repos_call_count: Arc<Mutex<usize>>,

    /// User ids requested from either endpoint, in call order
    pub requested_ids: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            user: Ok(User::new("Mock User", None)),
            repos: Ok(Vec::new()),
            login: None,
            delay: Duration::from_millis(0),
            user_call_count: Arc::new(Mutex::new(0)),
            repos_call_count: Arc::new(Mutex::new(0)),
            requested_ids: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock API for testing
#[derive(Debug, Clone)]
pub struct MockGithubApi {
    config: MockConfig,
}

impl MockGithubApi {
    /// Create a new mock API with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock that returns the given user and repositories
    pub fn success(user: User, repos: Vec<Repository>) -> Self {
        Self::new(MockConfig {
            user: Ok(user),
            repos: Ok(repos),
            ..Default::default()
        })
    }

    /// Create a mock whose user endpoint fails
    pub fn user_failure(error: ApiError) -> Self {
        Self::new(MockConfig {
            user: Err(error),
            ..Default::default()
        })
    }

    /// Create a mock whose user endpoint succeeds and repository endpoint fails
    pub fn repos_failure(user: User, error: ApiError) -> Self {
        Self::new(MockConfig {
            user: Ok(user),
            repos: Err(error),
            ..Default::default()
        })
    }

    /// Add latency to every request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Restrict responses to a single user id
    pub fn only_for(mut self, login: &str) -> Self {
        self.config.login = Some(login.to_string());
        self
    }

    /// Sample data for the offline demo mode
    pub fn demo() -> Self {
        let repos = vec![
            Repository {
                id: 1296269,
                name: "Hello-World".to_string(),
                description: Some("My first repository on GitHub!".to_string()),
                updated_at: "2024-11-04T10:00:00Z".to_string(),
                stargazers_count: 2700,
                forks: 6000,
            },
            Repository {
                id: 132935648,
                name: "boysenberry-repo-1".to_string(),
                description: Some("Testing".to_string()),
                updated_at: "2024-10-21T08:30:00Z".to_string(),
                stargazers_count: 340,
                forks: 190,
            },
            Repository {
                id: 18221276,
                name: "git-consortium".to_string(),
                description: None,
                updated_at: "2024-09-02T16:12:45Z".to_string(),
                stargazers_count: 125,
                forks: 130,
            },
            Repository {
                id: 20978623,
                name: "hello-worId".to_string(),
                description: Some("My first repository on GitHub.".to_string()),
                updated_at: "2024-07-15T11:05:00Z".to_string(),
                stargazers_count: 410,
                forks: 420,
            },
            Repository {
                id: 17881631,
                name: "Spoon-Knife".to_string(),
                description: Some("This repo is for demonstration purposes only.".to_string()),
                updated_at: "2024-11-01T09:45:00Z".to_string(),
                stargazers_count: 12900,
                forks: 142000,
            },
        ];

        Self::success(
            User::new(
                "The Octocat",
                Some("https://avatars.githubusercontent.com/u/583231?v=4".to_string()),
            ),
            repos,
        )
        .only_for("octocat")
        .with_delay(Duration::from_millis(250))
    }

    /// Get the number of times `get_user` was called
    pub fn user_call_count(&self) -> usize {
        *lock(&self.config.user_call_count)
    }

    /// Get the number of times `get_user_repos` was called
    pub fn repos_call_count(&self) -> usize {
        *lock(&self.config.repos_call_count)
    }

    /// Get all user ids that were requested
    pub fn requested_ids(&self) -> Vec<String> {
        lock(&self.config.requested_ids).clone()
    }

    async fn record(&self, counter: &Arc<Mutex<usize>>, user_id: &str) -> Result<()> {
        *lock(counter) += 1;
        lock(&self.config.requested_ids).push(user_id.to_string());

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        match &self.config.login {
            Some(login) if login != user_id => {
                Err(ApiError::NotFound(format!("user {user_id}")).into())
            }
            _ => Ok(()),
        }
    }
}

/// Lock a recorder, recovering the data from a poisoned mutex
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl GithubApi for MockGithubApi {
    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.record(&self.config.user_call_count, user_id).await?;
        self.config.user.clone().map_err(Into::into)
    }

    async fn get_user_repos(&self, user_id: &str) -> Result<Vec<Repository>> {
        self.record(&self.config.repos_call_count, user_id).await?;
        self.config.repos.clone().map_err(Into::into)
    }
}
