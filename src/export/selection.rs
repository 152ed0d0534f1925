use crate::tree::{walk, TreeNode};

/// Files picked for export, plus selectors that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// File paths in tree order
    pub files: Vec<String>,
    pub unmatched: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Select the files to export.
///
/// A selector matches the file with that exact path, or every file below
/// the folder with that path. With `all`, every file is selected.
pub fn select_files(forest: &[TreeNode], selectors: &[String], all: bool) -> Selection {
    let selectors: Vec<&str> = selectors
        .iter()
        .map(|s| s.trim().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    let mut matched = vec![false; selectors.len()];
    let mut files = Vec::new();

    walk(forest, |visit| {
        let path = visit.node.path.as_str();
        let mut hit = all;

        for (i, selector) in selectors.iter().enumerate() {
            // An empty folder still counts as matched
            if path == *selector || is_below(path, selector) {
                matched[i] = true;
                hit = true;
            }
        }

        if hit && !visit.node.is_folder() {
            files.push(path.to_string());
        }
    });

    let unmatched = selectors
        .iter()
        .zip(&matched)
        .filter_map(|(s, &m)| (!m).then(|| s.to_string()))
        .collect();

    Selection { files, unmatched }
}

fn is_below(path: &str, folder: &str) -> bool {
    path.len() > folder.len()
        && path.starts_with(folder)
        && path.as_bytes()[folder.len()] == b'/'
}
