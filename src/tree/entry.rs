use serde::Serialize;
use std::cmp::Ordering;

/// Whether an entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

impl EntryKind {
    /// Map a git object type from the trees API (`tree`, `blob`, `commit`).
    ///
    /// Submodules (`commit`) are treated as files: they are leaves with no
    /// listed children.
    pub fn from_git_type(git_type: &str) -> Self {
        match git_type {
            "tree" => EntryKind::Folder,
            _ => EntryKind::File,
        }
    }

    pub fn is_folder(self) -> bool {
        self == EntryKind::Folder
    }
}

/// One row of a repository listing: a path and what lives there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    /// Full `/`-delimited path from the repository root
    pub path: String,

    pub kind: EntryKind,

    /// Size in bytes, reported for files only
    pub size: Option<u64>,
}

impl RepositoryEntry {
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Folder,
            size: None,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Path of the containing folder, `None` for root-level entries.
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// A node of the repository tree. Folders own their children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    /// Last path segment
    pub name: String,

    /// Full path from the repository root
    pub path: String,

    pub kind: EntryKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Child nodes, always empty for files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn from_entry(entry: RepositoryEntry) -> Self {
        let name = match entry.path.rsplit_once('/') {
            Some((_, name)) => name.to_string(),
            None => entry.path.clone(),
        };

        Self {
            name,
            path: entry.path,
            kind: entry.kind,
            size: entry.size,
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Sort children recursively: folders first, then by name.
    pub fn sort_children(&mut self) {
        sort_siblings(&mut self.children);
    }
}

/// Sibling order: every folder before every file, then case-insensitive
/// name order with the raw name breaking ties.
pub fn compare_siblings(a: &TreeNode, b: &TreeNode) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// Sort a sibling list and every list below it.
pub fn sort_siblings(nodes: &mut [TreeNode]) {
    nodes.sort_by(compare_siblings);
    for node in nodes.iter_mut() {
        node.sort_children();
    }
}
