//! Giftscope CLI - gift recommendations from X (Twitter) profile analysis

use clap::Parser;

mod analysis;
mod analyzer;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod report;

use cli::{CacheCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default());
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            handle,
            max_results,
        } => cli::analyze::run(handle, max_results, cli.config.as_deref(), cli.no_cache).await,
        Commands::Init => cli::init::run(cli.config.as_deref()).await,
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Cache { command } => match command {
            CacheCommands::Stats => cli::cache::stats(cli.config.as_deref()),
            CacheCommands::Clear => cli::cache::clear(cli.config.as_deref()),
        },
        Commands::Version => {
            println!("giftscope version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
