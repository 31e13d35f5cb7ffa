//! Dashboard overview

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::RouteDisplay;
use crate::output::{self, json::format_json};
use crate::router::{self, ROUTES};

const DASHBOARD_ROUTE: &str = "/dashboard";

/// Greet the user and list the sections they can open
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let active = ctx.open(DASHBOARD_ROUTE).await?;

    let sections: Vec<RouteDisplay> = ROUTES
        .iter()
        .filter(|r| router::is_protected(r.path) && r.path != DASHBOARD_ROUTE)
        .map(RouteDisplay::from)
        .collect();

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "user": active.user,
                "sections": sections,
            });
            println!("{}", format_json(&body)?);
            Ok(())
        }
        OutputFormat::Pretty => {
            let title = router::resolve(DASHBOARD_ROUTE).title;
            println!("{} · {}\n", title.bold(), active.user.name.cyan());
            output::print_rows(&sections, ctx.format)
        }
        OutputFormat::Table => output::print_rows(&sections, ctx.format),
    }
}
