//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Prompt for the API location and authentication mode, then save the
/// config. Values already in the file are offered as defaults.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to AeroCast!".bold().green());
    println!("Let's set up your configuration.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let default_url = opts
        .api_url_ref()
        .map(str::to_string)
        .unwrap_or_else(|| config.api_base_url.clone());
    let api_base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(default_url)
        .interact_text()?;

    let mock_auth = Confirm::with_theme(&theme)
        .with_prompt("Use offline demo sign-in instead of the API?")
        .default(config.mock_auth)
        .interact()?;

    config = config.with_api_base_url(Some(api_base_url.trim()))?;
    config.mock_auth = mock_auth;
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    if mock_auth {
        println!("  Demo account: admin@aerocast.com / password123");
    }
    println!("\n{}", "Next: run 'aerocast login' to start a session.".cyan());

    Ok(())
}
