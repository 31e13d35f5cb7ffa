//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::models::SessionDisplay;
use crate::output::json::format_json;
use crate::session::SessionStatus;

fn display_for(status: &SessionStatus) -> SessionDisplay {
    match status {
        SessionStatus::Valid(active) => SessionDisplay::from(active),
        other => {
            log::debug!("No usable session: {:?}", other);
            SessionDisplay::signed_out()
        }
    }
}

/// Current session as shown by `status` and `refresh`
pub async fn session_display(ctx: &CommandContext) -> SessionDisplay {
    display_for(&ctx.session.store().ensure_session().await)
}

/// Show session, API and cache status.
///
/// With `verify`, a locally valid session is also checked against the
/// auth backend.
pub async fn run(opts: &GlobalOptions, verify: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let status = ctx.session.store().ensure_session().await;
    let display = display_for(&status);
    let config_path = Config::resolve_path(opts.config_ref())?;

    let accepted = if verify && status.is_valid() {
        Some(ctx.auth.check_session().await?)
    } else {
        None
    };

    if ctx.format == OutputFormat::Json {
        let body = serde_json::json!({
            "session": display,
            "server_accepted": accepted,
            "config_path": config_path.display().to_string(),
            "api_base_url": ctx.client.base_url().as_str(),
            "mock_auth": ctx.config.mock_auth,
        });
        println!("{}", format_json(&body)?);
        return Ok(());
    }

    println!("{}\n", "AeroCast Status".bold());
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!("API:         {}", ctx.client.base_url().as_str().cyan());
    println!();

    match status {
        SessionStatus::Valid(_) => {
            println!("{} Session active", "✓".green());
            for line in display.lines(Utc::now()) {
                println!("  {}", line);
            }
        }
        SessionStatus::Expired => {
            println!("{} Session expired (cleared)", "✗".red());
            println!("  → Run 'aerocast login' to sign in again");
        }
        SessionStatus::Malformed => {
            println!("{} Stored session was unreadable (cleared)", "✗".red());
            println!("  → Run 'aerocast login' to sign in again");
        }
        SessionStatus::Missing => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'aerocast login' to start a session");
        }
    }

    match accepted {
        Some(true) => println!("{} Backend accepts the session", "✓".green()),
        Some(false) => println!("{} Backend rejected the session", "✗".red()),
        None => {}
    }

    if ctx.config.mock_auth {
        println!("{} Offline mock authentication enabled", "○".dimmed());
    }

    Ok(())
}
