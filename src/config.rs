//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/snoolink/config.toml` (XDG) or platform config dir
//! 3. Project config: `.snoolink.toml`
//! 4. Environment variables: `SNOOLINK_*`
//!
//! # Example
//!
//! ```toml
//! [reddit]
//! oauth_url = "https://oauth.reddit.com"
//! short_url = "https://redd.it"
//! user_agent = "linux:my-bot:0.1 (by /u/someone)"
//! access_token = "..."
//!
//! [submission]
//! comment_limit = 500
//! comment_sort = "new"
//! ```
//!
//! Nested keys map to environment variables with `__` as separator, for
//! example `SNOOLINK_REDDIT__ACCESS_TOKEN` or `SNOOLINK_SUBMISSION__COMMENT_SORT`.

use std::ops::Deref;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default number of comments requested when a submission is fetched.
pub const DEFAULT_COMMENT_LIMIT: u32 = 2048;

/// Default comment ordering requested when a submission is fetched.
pub const DEFAULT_COMMENT_SORT: &str = "best";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reddit: RedditConfig,
    #[serde(default)]
    pub submission: SubmissionDefaults,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// Base URL for authenticated API requests.
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,
    /// Prefix for short links (`<short_url>/<id>`).
    #[serde(default = "default_short_url")]
    pub short_url: String,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// OAuth bearer token. Obtaining it is out of scope for this crate.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Values written onto every new submission before it is first fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDefaults {
    #[serde(default = "default_comment_limit")]
    pub comment_limit: u32,
    #[serde(default = "default_comment_sort")]
    pub comment_sort: String,
}

fn default_oauth_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_short_url() -> String {
    "https://redd.it".to_string()
}

fn default_user_agent() -> String {
    format!("snoolink/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    16
}

fn default_comment_limit() -> u32 {
    DEFAULT_COMMENT_LIMIT
}

fn default_comment_sort() -> String {
    DEFAULT_COMMENT_SORT.to_string()
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            oauth_url: default_oauth_url(),
            short_url: default_short_url(),
            user_agent: default_user_agent(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SubmissionDefaults {
    fn default() -> Self {
        Self {
            comment_limit: default_comment_limit(),
            comment_sort: default_comment_sort(),
        }
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::user_config_path(), Path::new(".snoolink.toml"))
    }

    /// Load config from explicit user and project files.
    ///
    /// Missing files are skipped; environment variables still apply last.
    pub fn load_from(user_config: &Path, project_config: &Path) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("SNOOLINK_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/snoolink/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("snoolink").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("snoolink").join("config.toml"))
            .unwrap_or_default()
    }
}
