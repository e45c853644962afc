//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueHint};

/// Glossary term hierarchies: build, update, search and navigate glossary forests
#[derive(Parser, Debug)]
#[command(name = "glosstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (repeat for more: -d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .glosstree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show glossary terms as a forest
    Tree {
        /// Term export (JSON array or search response)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// List one level of the hierarchy
    #[command(group(ArgGroup::new("level").args(["glossary", "parent"])))]
    Roots {
        /// Term export
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Glossary context: terms without a parent
        #[arg(short, long)]
        glossary: Option<String>,
        /// Parent term id: direct children of this term
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Filter the forest by a case-insensitive substring
    Search {
        /// Substring to look for in name or display name
        query: String,
        /// Term export
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Replace the children of a term with a separately fetched batch
    Expand {
        /// Id of the term to update
        term_id: String,
        /// Children export
        #[arg(value_hint = ValueHint::FilePath)]
        children: PathBuf,
        /// Term export
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Show breadcrumbs for a fully-qualified name
    Breadcrumbs {
        /// Fully-qualified term name
        fqn: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List term FQNs matching a wildcard query
    Terms {
        /// Term export
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Wildcard query (`*`, `?`)
        #[arg(short, long, default_value = "*")]
        query: String,
        /// 1-based page
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Page size (default: configured page_size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show filterable statuses and their badge class
    Statuses,

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
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
