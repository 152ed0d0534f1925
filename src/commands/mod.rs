pub mod export;
pub mod tree;

use crate::cli::RepoArgs;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubSession, RepoCoordinates, RepositorySnapshot, Token};

/// Open a session for `args` and fetch the repository listing.
pub(crate) async fn fetch_snapshot(
    args: &RepoArgs,
    config: &Config,
) -> Result<(GitHubSession, RepositorySnapshot)> {
    let coordinates: RepoCoordinates = args.repo.parse()?;
    let token = args.token.clone().and_then(Token::new);
    let session = GitHubSession::new(&config.github, token)?;

    tracing::info!(
        repo = %coordinates,
        authenticated = session.is_authenticated(),
        "Fetching repository tree"
    );

    let snapshot = session
        .fetch_snapshot(
            &coordinates,
            args.git_ref.as_deref(),
            &config.github.fallback_ref,
        )
        .await?;

    if snapshot.truncated {
        eprintln!(
            "Warning: GitHub truncated the listing of {}; the tree below is incomplete.",
            snapshot.repo
        );
    }

    Ok((session, snapshot))
}

/// `owner/repo@ref`, marked when the repository is known to be private.
pub(crate) fn header(snapshot: &RepositorySnapshot) -> String {
    match snapshot.private {
        Some(true) => format!("{} (private)", snapshot.repo),
        _ => snapshot.repo.to_string(),
    }
}
