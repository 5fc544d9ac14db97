//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod analyze;
pub mod cache;
pub mod context;
pub mod init;
pub mod status;

pub use context::CommandContext;

/// Giftscope - gift recommendations from X (Twitter) profile analysis
#[derive(Parser, Debug)]
#[command(name = "giftscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "GIFTSCOPE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GIFTSCOPE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "GIFTSCOPE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a profile and print the gift-recommendation report
    Analyze {
        /// Handle to analyze (leading @ optional)
        handle: String,

        /// Override the configured posts-per-request cap
        #[arg(long)]
        max_results: Option<u32>,
    },

    /// Initialize giftscope configuration
    Init,

    /// Show configuration and cache status
    Status,

    /// Manage the local response cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Display version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show entry counts and size on disk
    Stats,

    /// Remove all cached entries
    Clear,
}
