//! GitHub REST API access.

mod client;
mod models;
mod repo;
mod status;

pub use client::{decode_content, GitHubSession, RepositorySnapshot, Token};
pub use models::{ContentResponse, ErrorBody, RepoMetadata, TreeItem, TreeResponse};
pub use repo::{RepoCoordinates, RepoRef};
pub use status::{classify_status, RateLimit, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};
