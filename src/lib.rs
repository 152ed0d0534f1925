//! Repo Tree - Browse a GitHub repository's file tree from the terminal
//!
//! This crate provides functionality for:
//! - Fetching a repository listing through the GitHub REST API
//! - Building and rendering it as a sorted ASCII tree
//! - Exporting the contents of selected files into one document

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod tree;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, RepoTreeError, Result};
