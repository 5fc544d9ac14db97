//! Cache management commands

use colored::Colorize;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;

fn open_store(config_path: Option<&str>) -> Result<CacheStore> {
    let config = Config::load_at(config_path)?;
    let dir = config.resolve_cache_dir()?;
    Ok(CacheStore::open_at(&dir, config.cache_ttl())?)
}

/// Show entry counts and size on disk
pub fn stats(config_path: Option<&str>) -> Result<()> {
    let store = open_store(config_path)?;
    let stats = store.stats()?;

    println!("{}", "Cache statistics".bold());
    println!("Entries: {} ({} fresh)", stats.entries, stats.fresh);
    println!("Size on disk: {} KB", stats.total_bytes / 1024);

    Ok(())
}

/// Remove all cached entries
pub fn clear(config_path: Option<&str>) -> Result<()> {
    let store = open_store(config_path)?;
    let cleared = store.clear_all()?;

    println!(
        "{} Removed {} cache entries",
        "✓".green(),
        cleared.entries_removed
    );

    Ok(())
}
