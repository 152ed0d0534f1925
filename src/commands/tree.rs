//! Tree command implementation

use crate::cli::TreeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::tree::{
    build_forest, format_json, format_long, format_paths, render_text, FormatOptions, TreeNode,
    TreeStats,
};

/// Output layout for the tree command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Tree,
    Long,
    Paths,
    Json,
}

impl OutputMode {
    pub fn from_args(args: &TreeArgs) -> Self {
        if args.json {
            OutputMode::Json
        } else if args.paths {
            OutputMode::Paths
        } else if args.long {
            OutputMode::Long
        } else {
            OutputMode::Tree
        }
    }
}

/// Render `forest` in the requested layout.
pub fn render(forest: &[TreeNode], mode: OutputMode, options: &FormatOptions) -> Result<String> {
    let output = match mode {
        OutputMode::Tree => render_text(forest, options),
        OutputMode::Long => format_long(forest, options),
        OutputMode::Paths => format_paths(forest, options),
        OutputMode::Json => format_json(forest, options)?,
    };
    Ok(output)
}

/// Run the tree command
pub async fn run(args: TreeArgs, config: &Config) -> Result<()> {
    let (_, snapshot) = super::fetch_snapshot(&args.repo, config).await?;

    let header = super::header(&snapshot);
    let entry_count = snapshot.entries.len();
    let forest = build_forest(snapshot.entries);
    tracing::debug!(
        entries = entry_count,
        nodes = TreeStats::of(&forest).total(),
        "Built tree"
    );

    let format_options = FormatOptions::new()
        .with_max_depth(args.max_depth.or(config.max_depth()))
        .with_icons(config.render.icons && !args.no_icons);
    let mode = OutputMode::from_args(&args);

    let output = render(&forest, mode, &format_options)?;
    let stats = TreeStats::shown(&forest, format_options.max_depth);

    if mode == OutputMode::Json {
        println!("{}", output);
        return Ok(());
    }

    println!("{}", header);
    if !output.is_empty() {
        println!("{}", output);
    }

    // Print summary
    println!();
    println!("{} directories, {} files", stats.folders, stats.files);

    Ok(())
}
