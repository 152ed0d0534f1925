use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Repo Tree - Browse a GitHub repository's file tree from the terminal
#[derive(Parser, Debug)]
#[command(name = "repo-tree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the file tree of a repository
    Tree(TreeArgs),

    /// Concatenate the contents of selected files into one document
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Which repository to read, and how to authenticate.
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Repository as owner/repo or a github.com URL
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Branch, tag or commit (defaults to the repository's default branch)
    #[arg(short = 'r', long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Personal access token for private repositories and higher rate limits
    #[arg(
        short,
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        value_name = "TOKEN"
    )]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Maximum depth to display (0 = root level only)
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Plain names without folder/file icons
    #[arg(long)]
    pub no_icons: bool,

    /// Show file sizes
    #[arg(short, long, conflicts_with_all = ["paths", "json"])]
    pub long: bool,

    /// Print the full path of every entry instead of a tree
    #[arg(short, long, conflicts_with = "json")]
    pub paths: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Files or folders to export (folders include every file below them)
    #[arg(value_name = "PATHS")]
    pub selectors: Vec<String>,

    /// Export every file in the repository
    #[arg(short, long, conflicts_with = "selectors")]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_tree_command() {
        let cli = Cli::parse_from(["repo-tree", "tree", "rust-lang/cargo"]);
        match cli.command {
            Command::Tree(args) => {
                assert_eq!(args.repo.repo, "rust-lang/cargo");
                assert_eq!(args.repo.git_ref, None);
                assert!(!args.long);
            }
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn parse_tree_with_options() {
        let cli = Cli::parse_from([
            "repo-tree",
            "tree",
            "--ref",
            "v1.0",
            "--max-depth",
            "2",
            "--no-icons",
            "--long",
            "o/r",
        ]);
        match cli.command {
            Command::Tree(args) => {
                assert_eq!(args.repo.git_ref.as_deref(), Some("v1.0"));
                assert_eq!(args.max_depth, Some(2));
                assert!(args.no_icons);
                assert!(args.long);
            }
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn parse_export_selectors() {
        let cli = Cli::parse_from(["repo-tree", "export", "o/r", "src", "README.md"]);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.repo.repo, "o/r");
                assert_eq!(args.selectors, vec!["src", "README.md"]);
                assert!(!args.all);
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn export_all_conflicts_with_selectors() {
        let result = Cli::try_parse_from(["repo-tree", "export", "o/r", "--all", "src"]);
        assert!(result.is_err());
    }

    #[test]
    fn long_conflicts_with_json() {
        let result = Cli::try_parse_from(["repo-tree", "tree", "o/r", "--long", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["repo-tree", "-vvv", "tree", "o/r"]);
        assert_eq!(cli.verbose, 3);
    }
}
