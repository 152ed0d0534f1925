mod builder;
mod entry;
mod formatter;
mod walker;

pub use builder::{build_forest, TreeStats};
pub use entry::{compare_siblings, sort_siblings, EntryKind, RepositoryEntry, TreeNode};
pub use formatter::{
    format_json, format_long, format_paths, render_text, tree_rows, FormatOptions, TreeRow,
};
pub use walker::{walk, Visit};
