//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

/// Production backend used by the mobile client.
pub const DEFAULT_BASE_URL: &str = "http://core-craft-smart-classroom-c9f39cc2d22c.herokuapp.com";

/// Top-level classroom client configuration.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token returned by `login`.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Classroom used when a command does not name one.
    #[serde(default)]
    pub default_classroom: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("default_classroom", &self.default_classroom)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
            default_classroom: None,
        }
    }
}

impl ClientConfig {
    /// Build an API client from this configuration.
    pub fn client(&self) -> ApiClient {
        let client = ApiClient::new(&self.base_url).with_timeout(self.timeout_secs);
        match &self.token {
            Some(token) if !token.is_empty() => client.with_token(token),
            _ => client,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `classroom.toml` in the current directory
/// 2. `~/.config/classroom/config.toml`
///
/// Environment variable overrides: `CLASSROOM_BASE_URL`, `CLASSROOM_TOKEN`.
pub fn load_config() -> Result<ClientConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("classroom.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("CLASSROOM_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(token) = std::env::var("CLASSROOM_TOKEN") {
        config.token = Some(token);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.token = config.token.as_deref().map(resolve_env_vars);
    tracing::debug!(?config, "loaded client config");

    Ok(config)
}

fn parse_config(content: &str) -> Result<ClientConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("classroom"))
}
