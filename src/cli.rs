//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald localized marketing site server
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: herald.toml)
    #[arg(short = 'C', long, default_value = "herald.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the site. Reload content and translations on change
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,

        /// show render error details on recovery pages
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        debug: Option<bool>,
    },

    /// Route a URL and print the outcome and resolved content as JSON
    Resolve {
        /// Path or URL to resolve, e.g. `/de/blog/launch#intro`
        url: String,

        /// Client locale used for the bare root path, e.g. `de-DE`
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Index the content and report pages and posts per language
    Check,
}

#[allow(unused)]
impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_resolve(&self) -> bool {
        matches!(self.command, Commands::Resolve { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check)
    }
}
