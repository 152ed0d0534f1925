use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum RepoTreeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid repository '{0}': expected owner/repo or a github.com URL")]
    InvalidRepository(String),

    #[error("Nothing to export: {0}")]
    NothingSelected(String),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures talking to the GitHub API, classified into user-facing conditions.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Repository or ref not found{}", not_found_hint(.authenticated))]
    NotFoundOrPrivate { authenticated: bool },

    #[error("Authentication failed: the token is invalid or expired")]
    AuthenticationFailed,

    #[error("GitHub API rate limit exceeded{}", rate_limit_hint(.reset_at))]
    RateLimited { reset_at: Option<u64> },

    #[error("Access forbidden: {message}")]
    Forbidden { message: String },

    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode file content: {0}")]
    Decode(String),
}

fn not_found_hint(authenticated: &bool) -> &'static str {
    if *authenticated {
        ", or the token has no access to it"
    } else {
        ". If the repository is private, supply a personal access token (--token or GITHUB_TOKEN)"
    }
}

fn rate_limit_hint(reset_at: &Option<u64>) -> String {
    let wait = reset_at.and_then(|reset| {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        Some(reset.saturating_sub(now).div_ceil(60))
    });

    match wait {
        Some(minutes) => format!(
            "; resets in about {} minute(s). A personal access token raises the limit",
            minutes
        ),
        None => "; a personal access token raises the limit".to_string(),
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RepoTreeError>;
