use humansize::{format_size, BINARY};
use serde::Serialize;

use super::entry::{EntryKind, TreeNode};
use super::walker::{walk, Visit};

/// Format options for tree output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum depth to display (0 = root level only)
    pub max_depth: Option<usize>,
    /// Prefix names with folder/file icons
    pub icons: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            icons: true,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_icons(mut self, enabled: bool) -> Self {
        self.icons = enabled;
        self
    }

    fn shows(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    /// Marker and display name.
    fn label(&self, kind: EntryKind, name: &str) -> String {
        match (self.icons, kind) {
            (true, EntryKind::Folder) => format!("📁 {}", name),
            (true, EntryKind::File) => format!("📄 {}", name),
            (false, EntryKind::Folder) => format!("{}/", name),
            (false, EntryKind::File) => name.to_string(),
        }
    }
}

/// One line of the structured rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub depth: usize,
    pub is_last: bool,
    /// Last-sibling flag of each ancestor, outermost first
    pub ancestors_last: Vec<bool>,
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub size: Option<u64>,
}

impl TreeRow {
    fn from_visit(visit: &Visit<'_, '_>) -> Self {
        Self {
            depth: visit.depth,
            is_last: visit.is_last,
            ancestors_last: visit.ancestors_last.to_vec(),
            name: visit.node.name.clone(),
            path: visit.node.path.clone(),
            kind: visit.node.kind,
            size: visit.node.size,
        }
    }

    /// Guide columns plus connector, e.g. `│       └── `.
    pub fn guides(&self) -> String {
        let mut out: String = self
            .ancestors_last
            .iter()
            .map(|&last| if last { "    " } else { "│   " })
            .collect();
        out.push_str(if self.is_last { "└── " } else { "├── " });
        out
    }
}

/// Structured rendering: one row per displayed node, in traversal order.
pub fn tree_rows(forest: &[TreeNode], options: &FormatOptions) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    walk(forest, |visit| {
        if options.shows(visit.depth) {
            rows.push(TreeRow::from_visit(visit));
        }
    });
    rows
}

/// Flat-text rendering: `<prefix><connector><marker><name>` per node,
/// joined with newlines.
pub fn render_text(forest: &[TreeNode], options: &FormatOptions) -> String {
    let mut lines = Vec::new();
    walk(forest, |visit| {
        if options.shows(visit.depth) {
            lines.push(format!(
                "{}{}{}",
                visit.guide_prefix(),
                visit.connector(),
                options.label(visit.node.kind, &visit.node.name)
            ));
        }
    });
    lines.join("\n")
}

/// Tree with a right-aligned size column for files.
pub fn format_long(forest: &[TreeNode], options: &FormatOptions) -> String {
    let rows = tree_rows(forest, options);
    let labels: Vec<String> = rows
        .iter()
        .map(|row| format!("{}{}", row.guides(), options.label(row.kind, &row.name)))
        .collect();

    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    rows.iter()
        .zip(&labels)
        .map(|(row, label)| {
            let size_str = row
                .size
                .map(|s| format_size(s, BINARY))
                .unwrap_or_default();
            let padding = " ".repeat(width - label.chars().count());
            format!("{}{}  {:>10}", label, padding, size_str)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full path of every displayed node, one per line.
pub fn format_paths(forest: &[TreeNode], options: &FormatOptions) -> String {
    tree_rows(forest, options)
        .into_iter()
        .map(|row| row.path)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Forest as pretty-printed JSON, cut off below the depth limit.
pub fn format_json(forest: &[TreeNode], options: &FormatOptions) -> serde_json::Result<String> {
    match options.max_depth {
        Some(max) => serde_json::to_string_pretty(&prune(forest, max)),
        None => serde_json::to_string_pretty(forest),
    }
}

/// Copy of `nodes` without anything deeper than `max_depth`.
fn prune(nodes: &[TreeNode], max_depth: usize) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|node| TreeNode {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            size: node.size,
            children: match max_depth.checked_sub(1) {
                Some(next) => prune(&node.children, next),
                None => Vec::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_forest;
    use crate::tree::entry::RepositoryEntry;

    fn create_test_forest() -> Vec<TreeNode> {
        build_forest(vec![
            RepositoryEntry::folder("a"),
            RepositoryEntry::file("a/b.txt").with_size(1024),
            RepositoryEntry::file("c.txt").with_size(12),
        ])
    }

    #[test]
    fn test_render_text_connectors() {
        let output = render_text(&create_test_forest(), &FormatOptions::default());
        assert_eq!(output, "├── 📁 a\n│   └── 📄 b.txt\n└── 📄 c.txt");
    }

    #[test]
    fn test_render_text_is_deterministic() {
        let forest = create_test_forest();
        let options = FormatOptions::default();
        assert_eq!(render_text(&forest, &options), render_text(&forest, &options));
    }

    #[test]
    fn test_nested_last_siblings_prefix() {
        let forest = build_forest(vec![
            RepositoryEntry::folder("x"),
            RepositoryEntry::folder("x/y"),
            RepositoryEntry::file("x/y/z.txt"),
        ]);
        let output = render_text(&forest, &FormatOptions::default());
        let z_line = output.lines().last().unwrap();
        assert_eq!(z_line, "        └── 📄 z.txt");
    }

    #[test]
    fn test_render_without_icons() {
        let options = FormatOptions::new().with_icons(false);
        let output = render_text(&create_test_forest(), &options);
        assert_eq!(output, "├── a/\n│   └── b.txt\n└── c.txt");
    }

    #[test]
    fn test_depth_limit() {
        let options = FormatOptions::new().with_max_depth(Some(0));
        let output = render_text(&create_test_forest(), &options);
        assert!(output.contains("a"));
        assert!(!output.contains("b.txt"));
        assert!(output.contains("c.txt"));
    }

    #[test]
    fn test_rows_match_text_order() {
        let forest = create_test_forest();
        let options = FormatOptions::default();
        let rows = tree_rows(&forest, &options);
        let text = render_text(&forest, &options);

        assert_eq!(rows.len(), text.lines().count());
        for (row, line) in rows.iter().zip(text.lines()) {
            assert!(line.starts_with(&row.guides()));
            assert!(line.ends_with(&row.name));
        }
    }

    #[test]
    fn test_rows_carry_structure() {
        let rows = tree_rows(&create_test_forest(), &FormatOptions::default());
        assert_eq!(rows[1].path, "a/b.txt");
        assert_eq!(rows[1].depth, 1);
        assert!(rows[1].is_last);
        assert_eq!(rows[1].ancestors_last, vec![false]);
    }

    #[test]
    fn test_format_long_shows_sizes() {
        let output = format_long(&create_test_forest(), &FormatOptions::default());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "├── 📁 a");
        assert!(lines[1].ends_with("1 KiB"));
        assert!(lines[2].ends_with("12 B"));
    }

    #[test]
    fn test_format_paths() {
        let output = format_paths(&create_test_forest(), &FormatOptions::default());
        assert_eq!(output, "a\na/b.txt\nc.txt");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&create_test_forest(), &FormatOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "a");
        assert_eq!(value[0]["kind"], "folder");
        assert_eq!(value[0]["children"][0]["path"], "a/b.txt");
        assert_eq!(value[1]["size"], 12);
    }

    #[test]
    fn test_format_json_honors_depth_limit() {
        let options = FormatOptions::new().with_max_depth(Some(0));
        let json = format_json(&create_test_forest(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["path"], "a");
        assert!(value[0].get("children").is_none());
        assert_eq!(value[1]["path"], "c.txt");
    }

    #[test]
    fn test_empty_forest_renders_empty() {
        assert_eq!(render_text(&[], &FormatOptions::default()), "");
    }
}
