//! Analyze command implementation

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::analysis;
use crate::cli::CommandContext;
use crate::error::Result;

/// Run one analysis and print the markdown report
pub async fn run(
    handle: String,
    max_results: Option<u32>,
    config_path: Option<&str>,
    no_cache: bool,
) -> Result<()> {
    let ctx = CommandContext::new(config_path, no_cache, max_results)?;
    log::debug!(
        "Quota plan: {}/{}min window, {}/month",
        ctx.config.quota.window_limit,
        ctx.config.quota.window_minutes,
        ctx.config.quota.monthly_limit
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("static template"),
    );
    spinner.set_message(format!("分析 @{} 中...", handle.trim_start_matches('@')));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = analysis::analyze_profile(&ctx.analysis, &handle).await;

    spinner.finish_and_clear();
    println!("{}", report);

    Ok(())
}
