//! Status command implementation

use colored::Colorize;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration and cache state
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "Giftscope Configuration Status".bold());

    let config = match Config::load_at(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("{} Could not load configuration", "✗".red());
            println!("  → {}", e);
            return Ok(());
        }
    };

    match config_path {
        Some(path) => println!("Config file: {}", path.cyan()),
        None => {
            let path = Config::default_path()?;
            if path.exists() {
                println!("Config file: {}", path.display().to_string().cyan());
            } else {
                println!("Config file: {} {}", path.display(), "(not created)".dimmed());
            }
        }
    }
    println!();

    // Credential status
    if config.bearer_token.as_deref().is_some_and(|t| !t.is_empty()) {
        println!("{} Bearer token configured", "✓".green());
    } else {
        println!("{} Bearer token not configured", "✗".red());
        println!("  → Run 'giftscope init' or set GIFTSCOPE_BEARER_TOKEN");
    }

    if let Some(ref base) = config.api_base {
        println!("{} API base override: {}", "⚠".yellow(), base);
    }

    // Quota plan
    println!();
    println!(
        "Quota plan: {} calls / {} min window, {} calls / month",
        config.quota.window_limit.to_string().bold(),
        config.quota.window_minutes,
        config.quota.monthly_limit
    );
    println!(
        "Cache TTL: {}h, max posts per analysis: {}",
        config.cache_ttl_hours, config.max_results
    );

    // Cache state
    println!();
    let cache_dir = config.resolve_cache_dir()?;
    println!("Cache directory: {}", cache_dir.display().to_string().cyan());
    match CacheStore::open_at(&cache_dir, config.cache_ttl()) {
        Ok(store) => match store.stats() {
            Ok(stats) => {
                println!(
                    "{} {} entries ({} fresh), {} KB on disk",
                    "✓".green(),
                    stats.entries,
                    stats.fresh,
                    stats.total_bytes / 1024
                );
            }
            Err(e) => println!("{} Could not read cache stats: {}", "⚠".yellow(), e),
        },
        Err(e) => println!("{} Could not open cache: {}", "⚠".yellow(), e),
    }

    Ok(())
}
