//! Export command implementation.

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::{RepoTreeError, Result};
use crate::export::{assemble_export, select_files};
use crate::tree::build_forest;

/// Run the export command.
pub async fn run(args: ExportArgs, config: &Config, quiet: bool) -> Result<()> {
    if args.selectors.is_empty() && !args.all {
        return Err(RepoTreeError::NothingSelected(
            "name files or folders to export, or pass --all".to_string(),
        ));
    }

    let (session, snapshot) = super::fetch_snapshot(&args.repo, config).await?;
    let forest = build_forest(snapshot.entries);

    let selection = select_files(&forest, &args.selectors, args.all);
    for selector in &selection.unmatched {
        eprintln!("Warning: '{}' matches no file in {}", selector, snapshot.repo);
    }
    if selection.is_empty() {
        return Err(RepoTreeError::NothingSelected(format!(
            "no files selected in {}",
            snapshot.repo
        )));
    }

    tracing::info!(files = selection.files.len(), repo = %snapshot.repo, "Exporting files");

    let progress = progress_bar(selection.files.len() as u64, quiet || !config.export.progress);
    let report = assemble_export(&session, &snapshot.repo, &selection.files, |done, path| {
        progress.set_position(done as u64);
        progress.set_message(path.to_string());
    })
    .await;
    progress.finish_and_clear();

    println!("{}", report.document());

    eprintln!(
        "Exported {} files, {} failed",
        report.exported(),
        report.failed()
    );

    Ok(())
}

fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(len).with_style(style)
}
