use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::models::{ContentResponse, ErrorBody, RepoMetadata, TreeResponse};
use super::repo::{RepoCoordinates, RepoRef};
use super::status::{classify_status, RateLimit};
use crate::config::GitHubConfig;
use crate::error::ApiError;
use crate::export::FileSource;
use crate::tree::RepositoryEntry;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// A personal access token. Held in memory only; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// `None` for blank input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        (!value.is_empty()).then_some(Self(value))
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

/// One fetched listing of a repository.
#[derive(Debug, Clone)]
pub struct RepositorySnapshot {
    pub repo: RepoRef,
    pub entries: Vec<RepositoryEntry>,
    /// The API returned a partial listing
    pub truncated: bool,
    /// `None` when the metadata lookup failed
    pub private: Option<bool>,
}

/// Everything needed to talk to GitHub for one run: HTTP client, endpoints
/// and the optional credential.
#[derive(Clone)]
pub struct GitHubSession {
    client: Client,
    api_url: String,
    raw_url: String,
    token: Option<Token>,
}

impl fmt::Debug for GitHubSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSession")
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .field("token", &self.token)
            .finish()
    }
}

impl GitHubSession {
    pub fn new(config: &GitHubConfig, token: Option<Token>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        // The user agent comes from validated config; fall back rather than fail
        let agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("repo-tree"));
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            raw_url: config.raw_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn get(&self, url: &str) -> RequestBuilder {
        tracing::debug!(url, authenticated = self.is_authenticated(), "GET");
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    /// Pass 2xx responses through, classify everything else.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limit = RateLimit::from_headers(response.headers());
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|body| body.message);

        tracing::debug!(%status, ?rate_limit, ?message, "Request failed");
        Err(classify_status(
            status,
            rate_limit,
            self.is_authenticated(),
            message,
        ))
    }

    pub fn tree_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_url,
            encode(&repo.owner),
            encode(&repo.name),
            encode_path(&repo.git_ref)
        )
    }

    pub fn metadata_url(&self, repo: &RepoCoordinates) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            encode(&repo.owner),
            encode(&repo.name)
        )
    }

    pub fn raw_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_url,
            encode(&repo.owner),
            encode(&repo.name),
            encode_path(&repo.git_ref),
            encode_path(path)
        )
    }

    pub fn contents_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url,
            encode(&repo.owner),
            encode(&repo.name),
            encode_path(path),
            encode(&repo.git_ref)
        )
    }

    /// Recursive listing of `repo` at its ref.
    pub async fn fetch_tree(&self, repo: &RepoRef) -> Result<TreeResponse, ApiError> {
        let response = self
            .get(&self.tree_url(repo))
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        let tree: TreeResponse = read_json(self.check(response).await?).await?;
        tracing::debug!(entries = tree.tree.len(), truncated = tree.truncated, "Fetched tree");
        Ok(tree)
    }

    pub async fn fetch_metadata(&self, repo: &RepoCoordinates) -> Result<RepoMetadata, ApiError> {
        let response = self
            .get(&self.metadata_url(repo))
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        read_json(self.check(response).await?).await
    }

    /// Resolve the ref, fetch the listing, and look up visibility.
    ///
    /// The ref is `explicit_ref`, else the one embedded in the repository
    /// URL, else the default branch, else `fallback_ref`. Metadata failures
    /// never fail the fetch.
    pub async fn fetch_snapshot(
        &self,
        repo: &RepoCoordinates,
        explicit_ref: Option<&str>,
        fallback_ref: &str,
    ) -> Result<RepositorySnapshot, ApiError> {
        let metadata = match self.fetch_metadata(repo).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::debug!(error = %e, "Repository metadata lookup failed");
                None
            }
        };

        let git_ref = explicit_ref
            .map(str::to_string)
            .or_else(|| repo.url_ref.clone())
            .or_else(|| metadata.as_ref().and_then(|m| m.default_branch.clone()))
            .unwrap_or_else(|| fallback_ref.to_string());

        let pinned = repo.clone().at(git_ref);
        let tree = self.fetch_tree(&pinned).await?;

        Ok(RepositorySnapshot {
            repo: pinned,
            entries: tree.tree.into_iter().map(RepositoryEntry::from).collect(),
            truncated: tree.truncated,
            private: metadata.map(|m| m.private),
        })
    }

    /// Raw text of one file.
    ///
    /// Anonymous sessions use the raw download host. Authenticated sessions
    /// use the contents API, whose body is base64.
    pub async fn fetch_file_text(&self, repo: &RepoRef, path: &str) -> Result<String, ApiError> {
        if self.is_authenticated() {
            let response = self
                .get(&self.contents_url(repo, path))
                .header(ACCEPT, GITHUB_JSON)
                .send()
                .await?;
            let content: ContentResponse = read_json(self.check(response).await?).await?;
            decode_content(&content)
        } else {
            let response = self.get(&self.raw_url(repo, path)).send().await?;
            Ok(self.check(response).await?.text().await?)
        }
    }
}

impl FileSource for GitHubSession {
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<String, ApiError> {
        self.fetch_file_text(repo, path).await
    }
}

/// Body of a successful response as `T`. A malformed body is a decode error.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    })
}

/// Decode a contents API payload to text.
pub fn decode_content(content: &ContentResponse) -> Result<String, ApiError> {
    if !content.encoding.is_empty() && content.encoding != "base64" {
        return Err(ApiError::Decode(format!(
            "unsupported encoding '{}'",
            content.encoding
        )));
    }

    let compact: String = content
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Percent-encode each segment of a `/`-delimited path.
fn encode_path(path: &str) -> String {
    path.split('/').map(encode).collect::<Vec<_>>().join("/")
}
