use std::fmt;
use std::str::FromStr;

use crate::error::RepoTreeError;

/// Owner and name of a GitHub repository, plus a ref if one was embedded in
/// a `/tree/<ref>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
    pub url_ref: Option<String>,
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            url_ref: None,
        }
    }

    /// Pin these coordinates to a ref.
    pub fn at(self, git_ref: impl Into<String>) -> RepoRef {
        RepoRef {
            owner: self.owner,
            name: self.name,
            git_ref: git_ref.into(),
        }
    }
}

impl FromStr for RepoCoordinates {
    type Err = RepoTreeError;

    /// Accepts `owner/repo`, `owner/repo.git`, `github.com/owner/repo` and
    /// `https://github.com/owner/repo[/tree/<ref>]`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || RepoTreeError::InvalidRepository(input.to_string());

        let trimmed = input.trim();
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);
        let rest = without_scheme
            .strip_prefix("www.github.com/")
            .or_else(|| without_scheme.strip_prefix("github.com/"))
            .unwrap_or(without_scheme);

        let mut segments = rest.trim_matches('/').split('/');
        let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let name = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        let url_ref = match segments.next() {
            None => None,
            Some("tree") | Some("blob") => {
                let git_ref = segments.collect::<Vec<_>>().join("/");
                if git_ref.is_empty() {
                    return Err(invalid());
                }
                Some(git_ref)
            }
            Some(_) => return Err(invalid()),
        };

        if name.is_empty() || owner.contains(char::is_whitespace) || name.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            url_ref,
        })
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A repository pinned to a branch, tag or commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub git_ref: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.git_ref)
    }
}
