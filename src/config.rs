use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub render: RenderConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,
    /// Base URL for anonymous raw file downloads
    pub raw_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Ref used when none is given and the default branch can't be looked up
    pub fallback_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix names with folder/file icons
    pub icons: bool,
    /// Maximum depth to display (0 = root level only, unset = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Show a progress bar while fetching files
    pub progress: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
            user_agent: format!("repo-tree/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            fallback_ref: "main".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            icons: true,
            max_depth: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location if it exists.
    ///
    /// An explicitly given path must be readable. A missing file at the
    /// default location yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.is_file() => p,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");

        Ok(config)
    }

    /// `~/.config/repo-tree/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("repo-tree").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("github.api_url", &self.github.api_url),
            ("github.raw_url", &self.github.raw_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }

        if self.github.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "github.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.github.fallback_ref.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "github.fallback_ref must not be empty".into(),
            ));
        }

        if self.github.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "github.user_agent must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Display depth limit, `None` when unlimited.
    pub fn max_depth(&self) -> Option<usize> {
        self.render.max_depth
    }
}
