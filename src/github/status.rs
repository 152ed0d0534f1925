//! Mapping of non-2xx GitHub responses to [`ApiError`] conditions.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::ApiError;

pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Rate limit headers of a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: Option<u64>,
    pub reset_at: Option<u64>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        Self {
            remaining: number(RATE_LIMIT_REMAINING),
            reset_at: number(RATE_LIMIT_RESET),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// Classify a failed response.
///
/// `message` is the `message` field of the JSON error body, if any.
pub fn classify_status(
    status: StatusCode,
    rate_limit: RateLimit,
    authenticated: bool,
    message: Option<String>,
) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFoundOrPrivate { authenticated },
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed,
        StatusCode::FORBIDDEN if rate_limit.is_exhausted() => ApiError::RateLimited {
            reset_at: rate_limit.reset_at,
        },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            reset_at: rate_limit.reset_at,
        },
        StatusCode::FORBIDDEN => ApiError::Forbidden {
            message: message.unwrap_or_else(|| "request was refused".to_string()),
        },
        other => ApiError::Status {
            status: other.as_u16(),
            message: message.unwrap_or_else(|| {
                other
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            }),
        },
    }
}
