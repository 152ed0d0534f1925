//! Depth-first traversal shared by every rendering of a forest.

use super::entry::TreeNode;

/// A node as seen during traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'t, 'p> {
    pub node: &'t TreeNode,

    /// Depth in the forest (0 = root level)
    pub depth: usize,

    /// Whether this node is the last of its siblings
    pub is_last: bool,

    /// Last-sibling flag of each ancestor, outermost first
    pub ancestors_last: &'p [bool],
}

impl Visit<'_, '_> {
    /// Box-drawing prefix for this node's line: one column per ancestor.
    pub fn guide_prefix(&self) -> String {
        self.ancestors_last
            .iter()
            .map(|&last| if last { "    " } else { "│   " })
            .collect()
    }

    pub fn connector(&self) -> &'static str {
        if self.is_last {
            "└── "
        } else {
            "├── "
        }
    }
}

/// Walk `forest` in pre-order, calling `visit` for every node.
pub fn walk<'t, F>(forest: &'t [TreeNode], mut visit: F)
where
    F: FnMut(&Visit<'t, '_>),
{
    let mut ancestors = Vec::new();
    walk_siblings(forest, 0, &mut ancestors, &mut visit);
}

fn walk_siblings<'t, F>(
    siblings: &'t [TreeNode],
    depth: usize,
    ancestors: &mut Vec<bool>,
    visit: &mut F,
) where
    F: FnMut(&Visit<'t, '_>),
{
    let count = siblings.len();

    for (i, node) in siblings.iter().enumerate() {
        let is_last = i + 1 == count;

        visit(&Visit {
            node,
            depth,
            is_last,
            ancestors_last: ancestors.as_slice(),
        });

        if !node.children.is_empty() {
            ancestors.push(is_last);
            walk_siblings(&node.children, depth + 1, ancestors, visit);
            ancestors.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_forest;
    use crate::tree::entry::RepositoryEntry;

    #[test]
    fn test_pre_order() {
        let forest = build_forest(vec![
            RepositoryEntry::folder("a"),
            RepositoryEntry::file("a/b.txt"),
            RepositoryEntry::file("c.txt"),
        ]);

        let mut seen = Vec::new();
        walk(&forest, |v| seen.push((v.node.path.clone(), v.depth, v.is_last)));

        assert_eq!(
            seen,
            vec![
                ("a".to_string(), 0, false),
                ("a/b.txt".to_string(), 1, true),
                ("c.txt".to_string(), 0, true),
            ]
        );
    }

    #[test]
    fn test_ancestor_chain() {
        let forest = build_forest(vec![
            RepositoryEntry::folder("x"),
            RepositoryEntry::folder("x/y"),
            RepositoryEntry::file("x/y/z.txt"),
            RepositoryEntry::file("w.txt"),
        ]);

        let mut chains = Vec::new();
        walk(&forest, |v| {
            chains.push((v.node.name.clone(), v.ancestors_last.to_vec()))
        });

        assert_eq!(
            chains,
            vec![
                ("x".to_string(), vec![]),
                ("y".to_string(), vec![false]),
                ("z.txt".to_string(), vec![false, true]),
                ("w.txt".to_string(), vec![]),
            ]
        );
    }

    #[test]
    fn test_guides() {
        let forest = build_forest(vec![
            RepositoryEntry::folder("x"),
            RepositoryEntry::folder("x/y"),
            RepositoryEntry::file("x/y/z.txt"),
            RepositoryEntry::file("w.txt"),
        ]);

        let mut prefixes = Vec::new();
        walk(&forest, |v| prefixes.push(format!("{}{}", v.guide_prefix(), v.connector())));

        assert_eq!(prefixes, vec!["├── ", "│   └── ", "│       └── ", "└── "]);
    }

    #[test]
    fn test_empty_forest() {
        let mut calls = 0;
        walk(&[], |_| calls += 1);
        assert_eq!(calls, 0);
    }
}
