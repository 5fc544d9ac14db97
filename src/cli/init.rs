//! Init command implementation

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Password};

use crate::client::XApiClient;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for a bearer token, verifies it against the live API, and saves
/// the configuration. Quota and cache settings keep their defaults; they
/// can be edited in the config file afterwards.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to Giftscope!".bold().green());
    println!("Let's set up your X API access.\n");

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your X API bearer token")
        .interact()?;

    // Load existing config if present so quota tweaks survive re-init
    let mut config = Config::load_at(config_path).unwrap_or_default();

    println!("\n{}", "Verifying token...".cyan());
    let client = XApiClient::new(token.clone(), config.api_base.clone(), &config.quota)?;
    client.verify_token().await?;
    println!("{}", "✓ Token accepted!".green());

    config.bearer_token = Some(token);

    match config_path {
        Some(path) => config.save_to(path.into())?,
        None => config.save()?,
    }

    let shown_path = match config_path {
        Some(path) => path.to_string(),
        None => Config::default_path()?.display().to_string(),
    };
    println!("\nConfiguration saved to {}", shown_path.cyan());
    println!("Try: {}", "giftscope analyze <handle>".bold());

    Ok(())
}
