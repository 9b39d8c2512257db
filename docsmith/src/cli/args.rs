//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::services::DocKind;

/// Generate, serve and publish project documentation from templates and an export manifest
#[derive(Parser, Debug)]
#[command(name = "docsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a document
    Generate {
        /// Document kind
        #[arg(value_enum)]
        kind: DocKind,

        /// Project name (required for logo and project)
        #[arg(short = 'n', long)]
        project_name: Option<String>,
    },

    /// Serve the documentation locally (mkdocs serve)
    Serve,

    /// Publish the documentation to GitHub Pages (mkdocs gh-deploy)
    Deploy,

    /// Show the API documentation tree without writing anything
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Create a config template
    Init {
        /// Create the global config instead of the project-local one
        #[arg(short, long)]
        global: bool,
    },
}
