use serde::Deserialize;

use crate::tree::{EntryKind, RepositoryEntry};

/// Response from the git trees API.
/// `GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    pub sha: String,
    #[serde(default)]
    pub url: String,
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

/// A single entry of a tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub sha: String,
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<TreeItem> for RepositoryEntry {
    fn from(item: TreeItem) -> Self {
        RepositoryEntry {
            path: item.path,
            kind: EntryKind::from_git_type(&item.item_type),
            size: item.size,
        }
    }
}

/// The subset of `GET /repos/{owner}/{repo}` we use.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub private: bool,
    pub default_branch: Option<String>,
}

/// `GET /repos/{owner}/{repo}/contents/{path}` for a file.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
