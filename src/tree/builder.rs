use std::collections::HashMap;

use super::entry::{sort_siblings, RepositoryEntry, TreeNode};

/// Build a sorted forest from a flat list of repository entries.
///
/// Entries are attached to their parent folder by path. Root-level entries
/// (no `/` in the path) form the forest. An entry whose parent is missing
/// from the input, or is a file, is dropped together with its descendants.
pub fn build_forest<I>(entries: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = RepositoryEntry>,
{
    let mut nodes: HashMap<String, TreeNode> = HashMap::new();

    // Child path to parent path, for every non-root entry
    let mut parents: HashMap<String, String> = HashMap::new();

    for entry in entries {
        if entry.path.is_empty() {
            continue;
        }
        if let Some(parent) = entry.parent_path() {
            parents.insert(entry.path.clone(), parent.to_string());
        }
        // A repeated path keeps the last entry
        let node = TreeNode::from_entry(entry);
        nodes.insert(node.path.clone(), node);
    }

    // Deepest first, so every node already holds its children when it moves
    let mut children: Vec<(String, String)> = parents.into_iter().collect();
    children.sort_by_key(|(path, _)| std::cmp::Reverse(path.matches('/').count()));

    for (path, parent_path) in &children {
        let Some(node) = nodes.remove(path) else {
            continue;
        };

        match nodes.get_mut(parent_path) {
            Some(parent) if parent.is_folder() => parent.children.push(node),
            Some(_) => {
                tracing::debug!(path = %path, "Dropping entry whose parent is a file");
            }
            None => {
                tracing::debug!(path = %path, "Dropping entry with missing parent folder");
            }
        }
    }

    let mut forest: Vec<TreeNode> = nodes.into_values().collect();
    sort_siblings(&mut forest);
    forest
}

/// Folder and file counts of a forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
}

impl TreeStats {
    pub fn of(forest: &[TreeNode]) -> Self {
        Self::shown(forest, None)
    }

    /// Counts of the nodes at or above `max_depth`.
    pub fn shown(forest: &[TreeNode], max_depth: Option<usize>) -> Self {
        let mut stats = Self::default();
        super::walker::walk(forest, |visit| {
            if max_depth.is_some_and(|max| visit.depth > max) {
                return;
            }
            if visit.node.is_folder() {
                stats.folders += 1;
            } else {
                stats.files += 1;
            }
        });
        stats
    }

    pub fn total(&self) -> usize {
        self.folders + self.files
    }
}
