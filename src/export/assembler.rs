//! Sequential assembly of selected files into one document.

use std::collections::HashSet;

use crate::error::ApiError;
use crate::github::RepoRef;

/// Something that can retrieve the text of a file in a repository.
#[allow(async_fn_in_trait)]
pub trait FileSource {
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<String, ApiError>;
}

/// Outcome of retrieving one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSection {
    /// File content was retrieved.
    Fetched { path: String, content: String },
    /// Retrieval failed; the reason goes into the document instead.
    Failed { path: String, error: String },
}

impl ExportSection {
    pub fn path(&self) -> &str {
        match self {
            ExportSection::Fetched { path, .. } | ExportSection::Failed { path, .. } => path,
        }
    }

    /// `--- <path> ---` followed by the content or an error placeholder.
    pub fn render(&self) -> String {
        let body = match self {
            ExportSection::Fetched { content, .. } => {
                content.trim_end_matches(['\n', '\r']).to_string()
            }
            ExportSection::Failed { path, error } => {
                format!("[error fetching {}: {}]", path, error)
            }
        };
        format!("--- {} ---\n{}", self.path(), body)
    }
}

/// Result of an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub sections: Vec<ExportSection>,
}

impl ExportReport {
    /// All sections, separated by blank lines.
    pub fn document(&self) -> String {
        self.sections
            .iter()
            .map(ExportSection::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn exported(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s, ExportSection::Fetched { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.sections.len() - self.exported()
    }
}

/// Fetch every path in order, one request at a time.
///
/// A failed file becomes a placeholder section; it never aborts the run.
/// `on_progress` is called after each file with the number done so far.
pub async fn assemble_export<S, F>(
    source: &S,
    repo: &RepoRef,
    paths: &[String],
    mut on_progress: F,
) -> ExportReport
where
    S: FileSource,
    F: FnMut(usize, &str),
{
    let mut seen = HashSet::new();
    let mut report = ExportReport::default();

    for path in paths {
        if !seen.insert(path.as_str()) {
            continue;
        }

        let section = match source.fetch_file(repo, path).await {
            Ok(content) => ExportSection::Fetched {
                path: path.clone(),
                content,
            },
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to fetch file");
                ExportSection::Failed {
                    path: path.clone(),
                    error: e.to_string(),
                }
            }
        };

        report.sections.push(section);
        on_progress(report.sections.len(), path);
    }

    report
}
