//! Configuration management
//!
//! Defaults, then an optional TOML file, then environment variables.
//! Command-line flags are applied last by the binary.

use crate::defaults;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reddit credentials and endpoints
    #[serde(default)]
    pub reddit: RedditSettings,

    /// Translation service
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Pipeline settings
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Terminal chart settings
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Reddit API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditSettings {
    /// OAuth application id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth application secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Account name for the password grant
    #[serde(default)]
    pub username: Option<String>,

    /// Account password for the password grant
    #[serde(default)]
    pub password: Option<String>,

    /// Token endpoint host
    #[serde(default = "default_auth_base")]
    pub auth_base: String,

    /// OAuth API host
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    format!("subreddit_sentiment/{}", crate::VERSION)
}

fn default_auth_base() -> String {
    "https://www.reddit.com".to_string()
}

fn default_api_base() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_timeout_secs() -> u64 {
    defaults::HTTP_TIMEOUT_SECS
}

impl Default for RedditSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: default_user_agent(),
            username: None,
            password: None,
            auth_base: default_auth_base(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// LibreTranslate-compatible base URL; translation is off when unset
    #[serde(default)]
    pub url: Option<String>,

    /// API key, if the service requires one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Comments fetched per run
    #[serde(default = "default_comment_limit")]
    pub comment_limit: usize,

    /// Histogram bin count
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_comment_limit() -> usize {
    defaults::COMMENT_LIMIT
}

fn default_histogram_bins() -> usize {
    defaults::HISTOGRAM_BINS
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            comment_limit: default_comment_limit(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

/// Terminal chart settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Drawing area width (columns)
    #[serde(default = "default_chart_width")]
    pub width: usize,

    /// Drawing area height (rows)
    #[serde(default = "default_chart_height")]
    pub height: usize,

    /// Use ANSI colors
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_chart_width() -> usize {
    defaults::CHART_WIDTH
}

fn default_chart_height() -> usize {
    defaults::CHART_HEIGHT
}

fn default_color() -> bool {
    true
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("REDDIT_CLIENT_ID") {
            self.reddit.client_id = Some(id);
        }
        if let Some(secret) = lookup("REDDIT_CLIENT_SECRET") {
            self.reddit.client_secret = Some(secret);
        }
        if let Some(agent) = lookup("REDDIT_USER_AGENT") {
            self.reddit.user_agent = agent;
        }
        if let Some(username) = lookup("REDDIT_USERNAME") {
            self.reddit.username = Some(username);
        }
        if let Some(password) = lookup("REDDIT_PASSWORD") {
            self.reddit.password = Some(password);
        }
        if let Some(url) = lookup("TRANSLATE_URL") {
            self.translation.url = Some(url);
        }
        if let Some(key) = lookup("TRANSLATE_API_KEY") {
            self.translation.api_key = Some(key);
        }
        if let Some(limit) = lookup("SENTIMENT_COMMENT_LIMIT") {
            self.analysis.comment_limit = limit.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!("SENTIMENT_COMMENT_LIMIT is not a number: {limit}"))
            })?;
        }
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.comment_limit == 0 {
            return Err(ConfigError::ValidationError(
                "comment_limit must be at least 1".to_string(),
            ));
        }
        if self.analysis.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.charts.width < defaults::MIN_CHART_WIDTH
            || self.charts.height < defaults::MIN_CHART_HEIGHT
        {
            return Err(ConfigError::ValidationError(format!(
                "chart area {}x{} is smaller than {}x{}",
                self.charts.width,
                self.charts.height,
                defaults::MIN_CHART_WIDTH,
                defaults::MIN_CHART_HEIGHT
            )));
        }
        Ok(())
    }
}
