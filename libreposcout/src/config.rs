//! Configuration management for Reposcout

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub connectivity: ConnectivityConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub token: Option<SecretString>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pause between the profile fetch and the repository fetch
    pub stagger_delay_ms: u64,
    pub skip_connectivity_check: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub probe_host: String,
    pub probe_port: u16,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stagger_delay_ms: 400,
            skip_connectivity_check: false,
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_host: "api.github.com".to_string(),
            probe_port: 443,
            timeout_ms: 3000,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SearchConfig {
    pub fn stagger_delay(&self) -> Duration {
        Duration::from_millis(self.stagger_delay_ms)
    }
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: defaults are used instead. The
    /// `GITHUB_TOKEN` environment variable overrides any configured token.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_at(&config_path)
    }

    /// Load configuration from `path`, with the same fallbacks as `load`
    pub fn load_at(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_path(path)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: format!("'{}' must start with http:// or https://", base_url),
            }
            .into());
        }
        if self.connectivity.probe_host.trim().is_empty() {
            return Err(ConfigError::MissingField("connectivity.probe_host".to_string()).into());
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.trim().is_empty() {
                self.api.token = Some(SecretString::from(token));
            }
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("REPOSCOUT_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("reposcout").join("config.toml"))
}

fn deserialize_token<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert!(config.api.token.is_none());
        assert_eq!(config.search.stagger_delay(), Duration::from_millis(400));
        assert!(!config.search.skip_connectivity_check);
        assert_eq!(config.connectivity.probe_port, 443);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [search]
            stagger_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.search.stagger_delay_ms, 0);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.connectivity.probe_host, "api.github.com");
    }

    #[test]
    fn test_token_parsed_as_secret() {
        let config = Config::from_toml(
            r#"
            [api]
            token = "ghp_example"
            "#,
        )
        .unwrap();

        let token = config.api.token.as_ref().unwrap();
        assert_eq!(token.expose_secret(), "ghp_example");
        assert!(!format!("{:?}", config.api).contains("ghp_example"));
    }

    #[test]
    fn test_blank_token_ignored() {
        let config = Config::from_toml("[api]\ntoken = \"  \"\n").unwrap();
        assert!(config.api.token.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = Config::from_toml("[api]\nbase_url = \"ftp://example.com\"\n");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("api.base_url"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = Config::from_toml("[api\nbase_url = ");
        assert!(matches!(
            result,
            Err(crate::ReposcoutError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://127.0.0.1:8080\"\ntimeout_secs = 5").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api.timeout(), Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_from_env() {
        std::env::set_var("REPOSCOUT_CONFIG", "/tmp/reposcout-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("REPOSCOUT_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/reposcout-test.toml"));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults_and_env_token() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        std::env::set_var("REPOSCOUT_CONFIG", missing.to_str().unwrap());
        std::env::set_var("GITHUB_TOKEN", "ghp_from_env");

        let config = Config::load();

        std::env::remove_var("REPOSCOUT_CONFIG");
        std::env::remove_var("GITHUB_TOKEN");

        let config = config.unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(
            config.api.token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("ghp_from_env".to_string())
        );
    }
}
