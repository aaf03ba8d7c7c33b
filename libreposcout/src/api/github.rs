//! reqwest-backed GitHub REST client

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::api::GithubApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, Result};
use crate::types::{Repository, User};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("reposcout/", env!("CARGO_PKG_VERSION"));

/// Characters left unescaped in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct HttpGithubApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGithubApi {
    /// Build a client from the `[api]` configuration section
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ConfigError::InvalidValue {
                    field: "api.token".to_string(),
                    reason: e.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}",
            self.base_url,
            utf8_percent_encode(user_id, PATH_SEGMENT)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, subject: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from)?;

        let body = check_status(response, subject).await?;
        let value = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{subject}: {e}")))?;
        Ok(value)
    }
}

/// Turn a non-2xx response into an `ApiError`, otherwise return the body.
async fn check_status(response: Response, subject: &str) -> std::result::Result<String, ApiError> {
    let status = response.status();

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                == Some("0"));

    if rate_limited {
        let reset = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .map(|v| format!(" (resets at {v})"))
            .unwrap_or_default();
        return Err(ApiError::RateLimit(format!(
            "GitHub API rate limit reached while fetching {subject}{reset}"
        )));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(subject.to_string()));
    }

    let body = response.text().await.map_err(ApiError::from)?;

    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[async_trait]
impl GithubApi for HttpGithubApi {
    async fn get_user(&self, user_id: &str) -> Result<User> {
        let url = self.user_url(user_id);
        self.get_json(&url, &format!("user {user_id}")).await
    }

    async fn get_user_repos(&self, user_id: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/repos", self.user_url(user_id));
        self.get_json(&url, &format!("repositories of {user_id}"))
            .await
    }
}
